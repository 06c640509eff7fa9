use super::*;
use std::error::Error as StdError;

#[test]
fn test_auth_error_display() {
    let error = Error::Auth("GITHUB_TOKEN is not set".to_string());
    assert_eq!(error.to_string(), "Authentication error: GITHUB_TOKEN is not set");
}

#[test]
fn test_config_error_display() {
    let error = Error::Config("Missing field 'owner'".to_string());
    assert_eq!(error.to_string(), "Configuration error: Missing field 'owner'");
}

#[test]
fn test_invalid_arguments_error_display() {
    let error = Error::InvalidArguments("--name is required".to_string());
    assert_eq!(error.to_string(), "Invalid arguments: --name is required");
}

#[test]
fn test_state_error_display() {
    let error = Error::State("Failed to parse state file".to_string());
    assert_eq!(error.to_string(), "State file error: Failed to parse state file");
}

#[test]
fn test_reconcile_error_keeps_the_chain() {
    let error: Error = ReconcileError::ReadFailed {
        repository: "foo".to_string(),
        hook_id: 42,
        source: github_client::Error::RateLimitExceeded,
    }
    .into();

    assert_eq!(error.to_string(), "Webhook reconciliation failed");

    let source = error.source().expect("reconcile error should be the source");
    assert_eq!(
        source.to_string(),
        "Failed to read webhook 42 of repository 'foo'"
    );
    let root = source.source().expect("GitHub error should be preserved");
    assert!(root.to_string().to_lowercase().contains("rate limit"));
}

#[test]
fn test_github_error_conversion() {
    let error: Error = github_client::Error::AuthError("bad key".to_string()).into();

    assert!(matches!(error, Error::GitHub(_)));
    assert_eq!(error.to_string(), "GitHub client error");
    assert!(error.source().unwrap().to_string().contains("bad key"));
}

#[test]
fn test_error_debug_format() {
    let error = Error::Auth("test".to_string());
    let debug_output = format!("{:?}", error);
    assert!(debug_output.contains("Auth"));
    assert!(debug_output.contains("test"));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
