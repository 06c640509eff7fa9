//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub
//! webhook endpoints through the github_client crate. Callers are expected to branch on
//! [`Error::NotFound`] when a missing hook has a meaning of its own (for example an
//! already deleted webhook), and to surface every other variant verbatim.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Each variant carries enough context to render a user-facing message; the HTTP status
/// of a rejected request is preserved in [`Error::ApiError`].
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, WebhookClient};
///
/// match client.get_webhook("my-org", "my-repo", 42).await {
///     Ok(hook) => println!("Webhook points to {:?}", hook.config.url),
///     Err(Error::NotFound) => println!("Webhook is gone"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status that has no dedicated variant.
    ///
    /// Typical causes are validation failures (422) such as a duplicate hook or an
    /// unreachable URL, and permission problems (403) that are not rate limits.
    #[error("GitHub API request failed with status {status}: {message}")]
    ApiError {
        /// The HTTP status code returned by GitHub
        status: u16,
        /// The message GitHub returned in the error body
        message: String,
    },

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - GitHub App credentials are invalid or expired
    /// - The personal access token was rejected (401)
    /// - The installation token could not be created
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// GitHub answered successfully but the body did not have the expected shape.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code. For hooks
    /// this covers both a deleted hook and a deleted parent repository.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// Retrying is the caller's decision; this client never retries on its own.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced a GitHub response (connection, URI or encoding failure).
    #[error("Failed to send request to GitHub: {0}")]
    Transport(String),
}

impl Error {
    /// Returns the HTTP status code associated with the error, if one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiError { status, .. } => Some(*status),
            Error::NotFound => Some(404),
            Error::RateLimitExceeded => Some(403),
            _ => None,
        }
    }

    /// Returns `true` when the error means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}
