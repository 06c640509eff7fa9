//! `destroy` command.
//!
//! Deletes every webhook in the state file, then checks with GitHub that none of them
//! remain before the state is cleared.

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use github_client::WebhookClient;
use hook_sync_core::{TrackedWebhook, WebhookReconciler};
use tracing::{error, info, instrument};

use crate::{errors::Error, state::StateFile};

/// Arguments for `destroy`.
#[derive(Args, Debug, Clone)]
pub struct DestroyArgs {
    /// Path to the state file. Overrides the path from the configuration file.
    #[arg(long)]
    pub state: Option<PathBuf>,
}

/// Deletes all tracked webhooks.
///
/// The state file is only cleared once GitHub confirms that every webhook is gone, so
/// a failed destroy can be retried.
#[instrument(skip(reconciler))]
pub async fn destroy<C: WebhookClient>(
    reconciler: &WebhookReconciler<C>,
    state_path: &Path,
) -> Result<String, Error> {
    let mut state = StateFile::load(state_path)?;
    if state.is_empty() {
        return Ok("No tracked webhooks to destroy".to_string());
    }

    let tracked: Vec<TrackedWebhook> = state.iter().map(|(_, t)| t.clone()).collect();

    for (name, webhook) in state.iter() {
        info!(name = %name, id = %webhook.id, "Destroying webhook");
        reconciler
            .delete(&webhook.id, &webhook.spec.repository)
            .await
            .inspect_err(|e| error!(name = %name, error = %e, "Failed to destroy webhook"))?;
    }

    reconciler.verify_destroyed(&tracked).await?;

    state.clear();
    state.save(state_path)?;

    Ok(format!(
        "{} {} webhook(s)",
        "Destroyed".red().bold(),
        tracked.len()
    ))
}

#[cfg(test)]
#[path = "destroy_cmd_tests.rs"]
mod tests;
