//! Error types for webhook reconciliation.
//!
//! Every failure is terminal for the invocation that produced it: the reconciler never
//! retries and never falls back to a partial update. Errors carry the operation, the
//! repository and the hook ID, and keep the transport error as their source so the
//! caller can render a complete message.
//!
//! A webhook that GitHub reports as missing is *not* an error for reads (the webhook is
//! absent) or deletes (the webhook is already gone). It only becomes
//! [`ReconcileError::NotFound`] when an import points at a hook that does not exist.

use std::fmt;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type used throughout the reconciler.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// The write operation GitHub refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while reconciling a webhook.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// A webhook ID or import ID could not be parsed.
    ///
    /// Never retryable; the caller should surface it verbatim.
    #[error("Invalid webhook identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    /// The declared webhook was rejected before any call to GitHub was made.
    #[error("Invalid webhook {field}: {message}")]
    Validation { field: String, message: String },

    /// GitHub returned a value for a known configuration key that cannot be mapped back.
    #[error("GitHub returned unsupported value '{value}' for webhook configuration key '{key}'")]
    InvalidRemoteConfig { key: String, value: String },

    /// GitHub refused to create or update the webhook.
    #[error("GitHub rejected the webhook {operation} for repository '{repository}'")]
    RemoteRejected {
        operation: Operation,
        repository: String,
        #[source]
        source: github_client::Error,
    },

    /// Reading the webhook failed for a reason other than the webhook being absent.
    ///
    /// Also returned when an update targets a webhook that no longer exists.
    #[error("Failed to read webhook {hook_id} of repository '{repository}'")]
    ReadFailed {
        repository: String,
        hook_id: u64,
        #[source]
        source: github_client::Error,
    },

    /// Deleting the webhook failed for a reason other than the webhook being absent.
    #[error("Failed to delete webhook {hook_id} of repository '{repository}'")]
    DeleteFailed {
        repository: String,
        hook_id: u64,
        #[source]
        source: github_client::Error,
    },

    /// An import referenced a webhook that does not exist.
    #[error("Webhook {hook_id} does not exist in repository '{repository}'")]
    NotFound { repository: String, hook_id: u64 },

    /// Destroy verification found a webhook that should have been deleted.
    #[error("Webhook {hook_id} still exists in repository '{repository}'")]
    StillExists { repository: String, hook_id: u64 },
}

impl ReconcileError {
    /// Creates an [`ReconcileError::InvalidIdentifier`] error.
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`ReconcileError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a [`ReconcileError::InvalidRemoteConfig`] error.
    pub fn invalid_remote_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidRemoteConfig {
            key: key.into(),
            value: value.into(),
        }
    }
}
