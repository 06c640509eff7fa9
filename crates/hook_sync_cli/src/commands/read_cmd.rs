//! `read` and `import` commands.
//!
//! # Examples
//!
//! ```bash
//! # Show the current state of webhook 987654
//! hook-sync read --id 987654 --repository foo
//!
//! # Start tracking an existing webhook
//! hook-sync import foo/987654 --name ci
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use github_client::WebhookClient;
use hook_sync_core::{identity, TrackedWebhook, WebhookReconciler, WebhookSpec};
use serde_json::Value;
use tracing::{info, instrument};

use crate::{errors::Error, state::StateFile};

/// Arguments for `read`.
#[derive(Args, Debug, Clone)]
pub struct ReadArgs {
    /// Webhook ID assigned by GitHub.
    #[arg(long)]
    pub id: String,

    /// Repository the webhook belongs to.
    #[arg(long)]
    pub repository: String,

    /// Path to the state file. Overrides the path from the configuration file.
    #[arg(long)]
    pub state: Option<PathBuf>,
}

/// Arguments for `import`.
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// The webhook to import, as `<repository>/<hook id>`.
    pub import_id: String,

    /// Name to track the webhook under. Defaults to `<repository>-<hook id>`.
    #[arg(long)]
    pub name: Option<String>,

    /// Path to the state file. Overrides the path from the configuration file.
    #[arg(long)]
    pub state: Option<PathBuf>,
}

/// Reads a webhook from GitHub and prints it.
///
/// When the webhook is tracked, its state entry is refreshed; when it turns out to be
/// gone, the entry is dropped.
#[instrument(skip(reconciler))]
pub async fn read<C: WebhookClient>(
    reconciler: &WebhookReconciler<C>,
    args: &ReadArgs,
    state_path: &Path,
) -> Result<String, Error> {
    // State holds the canonical form, so `0042` must match a webhook tracked as `42`
    let id = identity::encode_id(identity::decode_id(&args.id)?);
    let mut state = StateFile::load(state_path)?;

    let (tracked_name, retained_secret) = match state.find(&id, &args.repository) {
        Some((name, tracked)) => (
            Some(name.to_string()),
            tracked.spec.configuration.secret.clone(),
        ),
        None => (None, None),
    };

    let observed = reconciler
        .read(&id, &args.repository, retained_secret.as_deref())
        .await?;

    match observed {
        Some(spec) => {
            let output = render_spec(&id, &spec);
            if let Some(name) = tracked_name {
                state.insert(name, TrackedWebhook { id, spec });
                state.save(state_path)?;
            }
            Ok(output)
        }
        None => {
            if let Some(name) = tracked_name {
                info!(name = %name, "Dropping webhook that no longer exists from the state");
                state.remove(&name);
                state.save(state_path)?;
            }
            Ok(format!(
                "Webhook {} no longer exists in repository '{}'",
                id, args.repository
            ))
        }
    }
}

/// Brings an existing webhook under management.
///
/// The imported webhook has no secret in the state; the next `apply` with a declared
/// secret sets it.
#[instrument(skip(reconciler))]
pub async fn import<C: WebhookClient>(
    reconciler: &WebhookReconciler<C>,
    args: &ImportArgs,
    state_path: &Path,
) -> Result<String, Error> {
    let (repository, hook_id) = identity::parse_import_id(&args.import_id)?;
    let id = identity::encode_id(hook_id);
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-{}", repository, id));

    let mut state = StateFile::load(state_path)?;
    if state.get(&name).is_some() {
        return Err(Error::InvalidArguments(format!(
            "A webhook is already tracked as '{}'",
            name
        )));
    }
    if let Some((existing, tracked)) = state.find(&id, &repository) {
        return Err(Error::InvalidArguments(format!(
            "Webhook {} is already tracked as '{}'",
            tracked.import_id()?,
            existing
        )));
    }

    let tracked = reconciler.import(&args.import_id).await?;
    let output = format!(
        "Imported webhook {} as '{}'\n{}",
        tracked.import_id()?,
        name,
        render_spec(&tracked.id, &tracked.spec)
    );

    state.insert(name, tracked);
    state.save(state_path)?;

    Ok(output)
}

/// Formats a webhook for display. The secret is never shown.
pub fn render_spec(id: &str, spec: &WebhookSpec) -> String {
    let config = &spec.configuration;
    let secret = if config.secret.is_some() {
        "(sensitive value)"
    } else {
        "(not set)"
    };

    let mut output = format!(
        "{} {} in repository '{}'\n  url: {}\n  content_type: {}\n  insecure_ssl: {}\n  active: {}\n  events: {}\n  secret: {}",
        "Webhook".bold(),
        id,
        spec.repository,
        config.url,
        config.content_type,
        config.insecure_ssl,
        spec.active,
        spec.events.join(", "),
        secret
    );
    for (key, value) in &config.extra {
        match value {
            Value::String(text) => output.push_str(&format!("\n  {}: {}", key, text)),
            other => output.push_str(&format!("\n  {}: {}", key, other)),
        }
    }
    output
}

#[cfg(test)]
#[path = "read_cmd_tests.rs"]
mod tests;
