use hook_sync_core::ReconcileError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the HookSync CLI application.
///
/// This enum represents all possible error conditions that can arise during
/// CLI operations, including authentication failures, configuration issues,
/// state file problems and failures reported by the reconciler.
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error occurred while building the GitHub client.
    ///
    /// This error is returned when no credentials are available, for example
    /// because the token environment variable is not set or the GitHub App
    /// private key cannot be read.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// Also used for declared webhook files that cannot be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The state file could not be read or written.
    #[error("State file error: {0}")]
    State(String),

    /// The reconciler rejected or failed an operation. The reconciler error is the
    /// source.
    #[error("Webhook reconciliation failed")]
    Reconcile(#[from] ReconcileError),

    /// The GitHub client could not be created. The client error is the source.
    #[error("GitHub client error")]
    GitHub(#[from] github_client::Error),
}
