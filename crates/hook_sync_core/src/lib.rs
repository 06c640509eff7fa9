//! # HookSync Core
//!
//! This crate reconciles declared GitHub repository webhooks against the webhooks that
//! actually exist on GitHub.
//!
//! ## Overview
//!
//! A declared webhook ([`WebhookSpec`]) names its repository, the events it subscribes
//! to, whether it is active, and its delivery configuration. The crate provides:
//! - [`config_codec`] - translation between the declared configuration and GitHub's
//!   flat hook config map
//! - [`identity`] - the opaque webhook identifier and the `<repository>/<hook id>`
//!   import form
//! - [`WebhookReconciler`] - create, read, update, delete and import against the
//!   GitHub API, plus plan/apply on top of them
//! - [`drift`] - comparison of declared and observed webhooks
//!
//! The crate never persists anything. Callers keep the [`TrackedWebhook`] returned by
//! each operation and hand it back on the next invocation; this is also how the
//! webhook secret, which GitHub never returns, survives a refresh.
//!
//! ## Examples
//!
//! ```no_run
//! use github_client::{create_token_client, GitHubClient};
//! use hook_sync_core::{ApplyAction, WebhookReconciler, WebhookSpec};
//! use secrecy::SecretString;
//!
//! # async fn example(spec: WebhookSpec) -> Result<(), Box<dyn std::error::Error>> {
//! let token = SecretString::from(std::env::var("GITHUB_TOKEN")?);
//! let client = GitHubClient::new(create_token_client(&token, None)?);
//! let reconciler = WebhookReconciler::new(client, "my-org");
//!
//! let outcome = reconciler.apply(&spec, None).await?;
//! assert_eq!(outcome.action, ApplyAction::Created);
//! println!("Webhook {} is in place", outcome.tracked.id);
//! # Ok(())
//! # }
//! ```

pub mod config_codec;
pub mod drift;
pub mod errors;
pub mod identity;
pub mod model;
pub mod reconciler;

pub use drift::{DriftField, FieldDiff};
pub use errors::{Operation, ReconcileError, ReconcileResult};
pub use model::{ContentType, TrackedWebhook, WebhookConfiguration, WebhookSpec};
pub use reconciler::{ApplyAction, ApplyOutcome, Plan, WebhookReconciler};
