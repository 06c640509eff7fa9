//! `plan` and `apply` commands.
//!
//! Both commands take a declared webhook from a TOML file and compare it with the
//! webhook tracked under the same name in the state file. `plan` only reports what
//! would change; `apply` makes the change and records the result.
//!
//! # Examples
//!
//! ```bash
//! # Show what would change
//! hook-sync plan --spec webhooks/ci.toml
//!
//! # Create or update the webhook, tracking it as "ci"
//! hook-sync apply --spec webhooks/ci.toml
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Args;
use colored::Colorize;
use github_client::WebhookClient;
use hook_sync_core::{ApplyAction, Plan, WebhookReconciler, WebhookSpec};
use tracing::{debug, info, instrument};

use crate::{errors::Error, state::StateFile};

/// Arguments shared by `plan` and `apply`.
#[derive(Args, Debug, Clone)]
pub struct SpecArgs {
    /// Path to the TOML file declaring the webhook.
    #[arg(long)]
    pub spec: PathBuf,

    /// Name the webhook is tracked under.
    ///
    /// Defaults to the file name of the declaration without its extension.
    #[arg(long)]
    pub name: Option<String>,

    /// Path to the state file. Overrides the path from the configuration file.
    #[arg(long)]
    pub state: Option<PathBuf>,
}

impl SpecArgs {
    /// Returns the name the webhook is tracked under.
    pub fn resource_name(&self) -> Result<String, Error> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }

        self.spec
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InvalidArguments(format!(
                    "Cannot derive a webhook name from {:?}; use --name",
                    self.spec
                ))
            })
    }
}

/// Loads a declared webhook from a TOML file.
///
/// # Errors
///
/// Returns `Error::Config` if the file cannot be read or does not describe a webhook.
pub fn load_spec(path: &Path) -> Result<WebhookSpec, Error> {
    debug!("Loading webhook spec from {:?}", path);

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read webhook spec {:?}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse webhook spec {:?}: {}", path, e)))
}

/// Reports what `apply` would do, without changing anything.
#[instrument(skip(reconciler))]
pub async fn plan<C: WebhookClient>(
    reconciler: &WebhookReconciler<C>,
    args: &SpecArgs,
    state_path: &Path,
) -> Result<String, Error> {
    let name = args.resource_name()?;
    let declared = load_spec(&args.spec)?;
    let state = StateFile::load(state_path)?;

    let plan = reconciler.plan(&declared, state.get(&name)).await?;

    let mut output = render_plan(&name, &declared, &plan);
    if plan.has_changes() {
        output.push_str("\n\nRun 'hook-sync apply' to make these changes.");
    }
    Ok(output)
}

/// Creates, updates or replaces the webhook so that it matches the declaration, then
/// saves the result to the state file.
#[instrument(skip(reconciler))]
pub async fn apply<C: WebhookClient>(
    reconciler: &WebhookReconciler<C>,
    args: &SpecArgs,
    state_path: &Path,
) -> Result<String, Error> {
    let name = args.resource_name()?;
    let declared = load_spec(&args.spec)?;
    let mut state = StateFile::load(state_path)?;

    let outcome = reconciler.apply(&declared, state.get(&name)).await?;
    let id = outcome.tracked.id.clone();

    state.insert(name.as_str(), outcome.tracked);
    state.save(state_path)?;

    info!(name = %name, id = %id, action = ?outcome.action, "Webhook state saved");

    Ok(render_outcome(&name, &id, outcome.action))
}

/// Formats a plan for display.
pub fn render_plan(name: &str, declared: &WebhookSpec, plan: &Plan) -> String {
    match plan {
        Plan::Create => format!(
            "{} {} will be created in repository '{}'",
            "+".green().bold(),
            name.bold(),
            declared.repository
        ),
        Plan::Update {
            id,
            changes,
            secret_changed,
        } => {
            let mut output = format!(
                "{} {} (webhook {}) will be updated in place",
                "~".yellow().bold(),
                name.bold(),
                id
            );
            for change in changes {
                output.push_str(&format!("\n    {}", change));
            }
            if *secret_changed {
                output.push_str("\n    configuration.secret: (sensitive value)");
            }
            output
        }
        Plan::Replace {
            id,
            from_repository,
        } => format!(
            "{} {} (webhook {}) will be replaced\n    repository: \"{}\" => \"{}\"",
            "-/+".red().bold(),
            name.bold(),
            id,
            from_repository,
            declared.repository
        ),
        Plan::NoChange { id, .. } => {
            format!("{} (webhook {}) is up to date", name.bold(), id)
        }
    }
}

fn render_outcome(name: &str, id: &str, action: ApplyAction) -> String {
    let verb = match action {
        ApplyAction::Created => "created".green(),
        ApplyAction::Updated => "updated".yellow(),
        ApplyAction::Replaced => "replaced".red(),
        ApplyAction::Unchanged => "unchanged".normal(),
    };

    format!("{}: webhook {} {}", name.bold(), id, verb)
}

#[cfg(test)]
#[path = "apply_cmd_tests.rs"]
mod tests;
