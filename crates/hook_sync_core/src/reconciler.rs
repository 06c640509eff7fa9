//! Create, read, update, delete and import of repository webhooks.
//!
//! This module provides the [`WebhookReconciler`], which drives the GitHub hooks API
//! for one organization. Each operation addresses exactly one webhook and either
//! succeeds completely or returns an error; nothing is retried and nothing is
//! partially applied.

use github_client::{Error as GitHubError, WebhookClient};
use tracing::{info, instrument, warn};

use crate::{
    config_codec,
    drift::{self, FieldDiff},
    identity, Operation, ReconcileError, ReconcileResult, TrackedWebhook, WebhookSpec,
};

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

/// Reconciles declared webhooks against GitHub.
///
/// The reconciler only holds the client handle and the owning organization. It keeps
/// no per-webhook state, so one instance can serve concurrent calls for different
/// webhooks.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::GitHubClient;
/// use hook_sync_core::{WebhookConfiguration, WebhookReconciler, WebhookSpec};
///
/// # async fn example(client: GitHubClient) -> Result<(), Box<dyn std::error::Error>> {
/// let reconciler = WebhookReconciler::new(client, "my-org");
///
/// let spec = WebhookSpec {
///     repository: "my-repo".to_string(),
///     events: vec!["push".to_string()],
///     active: true,
///     configuration: WebhookConfiguration::new("https://example.com/webhook"),
/// };
///
/// let tracked = reconciler.create(&spec).await?;
/// println!("Created webhook {}", tracked.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WebhookReconciler<C> {
    client: C,
    owner: String,
}

/// What [`WebhookReconciler::apply`] would do for a declared webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Nothing is tracked, or the tracked webhook no longer exists.
    Create,

    /// The webhook exists but has drifted, or the declared secret changed.
    Update {
        id: String,
        changes: Vec<FieldDiff>,
        secret_changed: bool,
    },

    /// The declared repository differs from the tracked one. A webhook cannot move
    /// between repositories, so the old one is deleted and a new one created.
    Replace { id: String, from_repository: String },

    /// The webhook matches the declaration.
    NoChange { id: String, observed: WebhookSpec },
}

impl Plan {
    /// Returns `true` if applying the plan would call GitHub to change anything.
    pub fn has_changes(&self) -> bool {
        !matches!(self, Plan::NoChange { .. })
    }
}

/// What [`WebhookReconciler::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    Created,
    Updated,
    Replaced,
    Unchanged,
}

/// Result of [`WebhookReconciler::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub action: ApplyAction,

    /// State the caller should persist for the next invocation
    pub tracked: TrackedWebhook,
}

impl<C> WebhookReconciler<C>
where
    C: WebhookClient,
{
    /// Creates a reconciler for webhooks of repositories owned by `owner`.
    pub fn new(client: C, owner: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
        }
    }

    /// Creates a webhook.
    ///
    /// The returned state carries the ID GitHub assigned and the refreshed webhook,
    /// with the declared secret retained.
    ///
    /// # Errors
    ///
    /// * `ReconcileError::Validation` - the declared webhook was rejected before calling GitHub
    /// * `ReconcileError::RemoteRejected` - GitHub refused the webhook
    /// * `ReconcileError::InvalidRemoteConfig` - the created webhook could not be mapped back
    #[instrument(skip(self, spec), fields(owner = %self.owner, repository = %spec.repository))]
    pub async fn create(&self, spec: &WebhookSpec) -> ReconcileResult<TrackedWebhook> {
        spec.validate()?;

        let payload = config_codec::to_remote_payload(spec);
        let created = self
            .client
            .create_webhook(&self.owner, &spec.repository, &payload)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to create webhook");
                ReconcileError::RemoteRejected {
                    operation: Operation::Create,
                    repository: spec.repository.clone(),
                    source: e,
                }
            })?;

        info!(hook_id = created.id, "Webhook created");

        let refreshed = config_codec::from_remote_webhook(
            &created,
            &spec.repository,
            spec.configuration.secret.as_deref(),
        )?;

        Ok(TrackedWebhook {
            id: identity::encode_id(created.id),
            spec: refreshed,
        })
    }

    /// Reads the current state of a webhook.
    ///
    /// Returns `Ok(None)` when the webhook (or its repository) no longer exists. The
    /// refreshed configuration carries `retained_secret`, since GitHub never returns the
    /// secret.
    ///
    /// # Errors
    ///
    /// * `ReconcileError::InvalidIdentifier` - `id` is not a hook ID
    /// * `ReconcileError::ReadFailed` - GitHub failed for any reason other than 404
    /// * `ReconcileError::InvalidRemoteConfig` - the webhook could not be mapped back
    #[instrument(skip(self, retained_secret), fields(owner = %self.owner))]
    pub async fn read(
        &self,
        id: &str,
        repository: &str,
        retained_secret: Option<&str>,
    ) -> ReconcileResult<Option<WebhookSpec>> {
        let hook_id = identity::decode_id(id)?;

        let webhook = match self.client.get_webhook(&self.owner, repository, hook_id).await {
            Ok(webhook) => webhook,
            Err(GitHubError::NotFound) => {
                info!(hook_id, "Webhook no longer exists");
                return Ok(None);
            }
            Err(e) => {
                warn!(hook_id, error = %e, "Failed to read webhook");
                return Err(ReconcileError::ReadFailed {
                    repository: repository.to_string(),
                    hook_id,
                    source: e,
                });
            }
        };

        let refreshed = config_codec::from_remote_webhook(&webhook, repository, retained_secret)?;
        Ok(Some(refreshed))
    }

    /// Replaces the configuration, events and active flag of an existing webhook.
    ///
    /// `repository` is the repository the webhook currently lives in. The repository in
    /// `spec` is not checked against it; use [`plan`](Self::plan) to detect a move.
    ///
    /// # Errors
    ///
    /// * `ReconcileError::InvalidIdentifier` - `id` is not a hook ID
    /// * `ReconcileError::Validation` - the declared webhook was rejected before calling GitHub
    /// * `ReconcileError::ReadFailed` - the webhook no longer exists; it is not recreated
    /// * `ReconcileError::RemoteRejected` - GitHub refused the update
    #[instrument(skip(self, spec), fields(owner = %self.owner))]
    pub async fn update(
        &self,
        id: &str,
        repository: &str,
        spec: &WebhookSpec,
    ) -> ReconcileResult<WebhookSpec> {
        let hook_id = identity::decode_id(id)?;
        spec.validate()?;

        let payload = config_codec::to_update_payload(spec);
        let updated = match self
            .client
            .update_webhook(&self.owner, repository, hook_id, &payload)
            .await
        {
            Ok(webhook) => webhook,
            Err(GitHubError::NotFound) => {
                warn!(hook_id, "Webhook disappeared before it could be updated");
                return Err(ReconcileError::ReadFailed {
                    repository: repository.to_string(),
                    hook_id,
                    source: GitHubError::NotFound,
                });
            }
            Err(e) => {
                warn!(hook_id, error = %e, "Failed to update webhook");
                return Err(ReconcileError::RemoteRejected {
                    operation: Operation::Update,
                    repository: repository.to_string(),
                    source: e,
                });
            }
        };

        info!(hook_id, "Webhook updated");

        config_codec::from_remote_webhook(
            &updated,
            repository,
            spec.configuration.secret.as_deref(),
        )
    }

    /// Deletes a webhook. Deleting a webhook that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// * `ReconcileError::InvalidIdentifier` - `id` is not a hook ID
    /// * `ReconcileError::DeleteFailed` - GitHub failed for any reason other than 404
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub async fn delete(&self, id: &str, repository: &str) -> ReconcileResult<()> {
        let hook_id = identity::decode_id(id)?;

        match self
            .client
            .delete_webhook(&self.owner, repository, hook_id)
            .await
        {
            Ok(()) => {
                info!(hook_id, "Webhook deleted");
                Ok(())
            }
            Err(GitHubError::NotFound) => {
                info!(hook_id, "Webhook was already deleted");
                Ok(())
            }
            Err(e) => {
                warn!(hook_id, error = %e, "Failed to delete webhook");
                Err(ReconcileError::DeleteFailed {
                    repository: repository.to_string(),
                    hook_id,
                    source: e,
                })
            }
        }
    }

    /// Brings an existing webhook under management.
    ///
    /// `import_id` has the form `<repository>/<hook id>`. The imported state has no
    /// secret, because GitHub does not return it.
    ///
    /// # Errors
    ///
    /// * `ReconcileError::InvalidIdentifier` - `import_id` is malformed
    /// * `ReconcileError::NotFound` - the webhook does not exist
    /// * `ReconcileError::ReadFailed` - GitHub failed for any reason other than 404
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub async fn import(&self, import_id: &str) -> ReconcileResult<TrackedWebhook> {
        let (repository, hook_id) = identity::parse_import_id(import_id)?;
        let id = identity::encode_id(hook_id);

        let spec = self
            .read(&id, &repository, None)
            .await?
            .ok_or_else(|| ReconcileError::NotFound {
                repository: repository.clone(),
                hook_id,
            })?;

        info!(hook_id, repository = %repository, "Webhook imported");

        Ok(TrackedWebhook { id, spec })
    }

    /// Decides what [`apply`](Self::apply) has to do to make GitHub match `declared`.
    ///
    /// `prior` is the state persisted by the previous invocation, if any. The tracked
    /// webhook is refreshed first; a webhook that has disappeared is planned for
    /// creation again. A changed secret is reported on its own since it never shows up
    /// as drift.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of the declared webhook and the errors of
    /// [`read`](Self::read).
    #[instrument(skip(self, declared, prior), fields(owner = %self.owner, repository = %declared.repository))]
    pub async fn plan(
        &self,
        declared: &WebhookSpec,
        prior: Option<&TrackedWebhook>,
    ) -> ReconcileResult<Plan> {
        declared.validate()?;

        let prior = match prior {
            Some(prior) => prior,
            None => return Ok(Plan::Create),
        };

        if prior.spec.repository != declared.repository {
            return Ok(Plan::Replace {
                id: prior.id.clone(),
                from_repository: prior.spec.repository.clone(),
            });
        }

        let retained_secret = prior.spec.configuration.secret.as_deref();
        let observed = match self
            .read(&prior.id, &prior.spec.repository, retained_secret)
            .await?
        {
            Some(observed) => observed,
            None => return Ok(Plan::Create),
        };

        let changes = drift::diff(declared, &observed);
        let secret_changed = declared.configuration.secret.as_deref() != retained_secret;

        if changes.is_empty() && !secret_changed {
            return Ok(Plan::NoChange {
                id: prior.id.clone(),
                observed,
            });
        }

        Ok(Plan::Update {
            id: prior.id.clone(),
            changes,
            secret_changed,
        })
    }

    /// Makes GitHub match `declared` and returns the state to persist.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`plan`](Self::plan) and of the operation the plan calls
    /// for.
    pub async fn apply(
        &self,
        declared: &WebhookSpec,
        prior: Option<&TrackedWebhook>,
    ) -> ReconcileResult<ApplyOutcome> {
        let outcome = match self.plan(declared, prior).await? {
            Plan::Create => ApplyOutcome {
                action: ApplyAction::Created,
                tracked: self.create(declared).await?,
            },
            Plan::Update { id, .. } => {
                let spec = self.update(&id, &declared.repository, declared).await?;
                ApplyOutcome {
                    action: ApplyAction::Updated,
                    tracked: TrackedWebhook { id, spec },
                }
            }
            Plan::Replace {
                id,
                from_repository,
            } => {
                self.delete(&id, &from_repository).await?;
                ApplyOutcome {
                    action: ApplyAction::Replaced,
                    tracked: self.create(declared).await?,
                }
            }
            Plan::NoChange { id, observed } => ApplyOutcome {
                action: ApplyAction::Unchanged,
                tracked: TrackedWebhook { id, spec: observed },
            },
        };

        info!(
            owner = %self.owner,
            repository = %declared.repository,
            id = %outcome.tracked.id,
            action = ?outcome.action,
            "Webhook applied"
        );

        Ok(outcome)
    }

    /// Confirms that none of the tracked webhooks exist any more.
    ///
    /// Every webhook is checked, even after one is found to still exist.
    ///
    /// # Errors
    ///
    /// Returns the first failure in `tracked` order: `ReconcileError::StillExists` for
    /// a webhook that is still present, or the error of [`read`](Self::read).
    #[instrument(skip(self, tracked), fields(owner = %self.owner, count = tracked.len()))]
    pub async fn verify_destroyed(&self, tracked: &[TrackedWebhook]) -> ReconcileResult<()> {
        let mut first_failure = None;

        for webhook in tracked {
            if let Err(e) = self.confirm_absent(webhook).await {
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => {
                info!("All tracked webhooks are destroyed");
                Ok(())
            }
        }
    }

    async fn confirm_absent(&self, webhook: &TrackedWebhook) -> ReconcileResult<()> {
        let hook_id = webhook.hook_id()?;
        let repository = &webhook.spec.repository;

        match self.read(&webhook.id, repository, None).await? {
            None => Ok(()),
            Some(_) => {
                warn!(hook_id, repository = %repository, "Webhook still exists");
                Err(ReconcileError::StillExists {
                    repository: repository.clone(),
                    hook_id,
                })
            }
        }
    }
}
