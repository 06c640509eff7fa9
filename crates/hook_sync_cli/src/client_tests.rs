use super::*;
use crate::config::{AuthenticationConfig, GitHubConfig};
use std::path::PathBuf;
use tempfile::TempDir;

fn config_with(authentication: AuthenticationConfig) -> AppConfig {
    AppConfig {
        github: GitHubConfig {
            owner: "my-org".to_string(),
            api_url: None,
        },
        authentication,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_token_auth_requires_environment_variable() {
    let config = config_with(AuthenticationConfig {
        token_env: "HOOK_SYNC_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
        ..Default::default()
    });

    let result = create_github_client(&config).await;

    match result {
        Err(Error::Auth(msg)) => assert!(msg.contains("HOOK_SYNC_TEST_TOKEN_THAT_IS_NEVER_SET")),
        other => panic!("Expected Auth error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_token_auth_builds_client() {
    std::env::set_var("HOOK_SYNC_TEST_TOKEN_BUILD", "ghp_test_token");
    let mut config = config_with(AuthenticationConfig {
        token_env: "HOOK_SYNC_TEST_TOKEN_BUILD".to_string(),
        ..Default::default()
    });
    config.github.api_url = Some("http://127.0.0.1:9".to_string());

    let result = create_github_client(&config).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_app_auth_requires_settings() {
    let config = config_with(AuthenticationConfig {
        auth_method: "app".to_string(),
        app_id: Some(12345),
        ..Default::default()
    });

    let result = create_github_client(&config).await;

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("installation_id")),
        other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_app_auth_with_missing_key_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = config_with(AuthenticationConfig {
        auth_method: "app".to_string(),
        app_id: Some(12345),
        installation_id: Some(678),
        private_key_path: Some(temp_dir.path().join("missing.pem")),
        ..Default::default()
    });

    let result = create_github_client(&config).await;

    match result {
        Err(Error::Auth(msg)) => assert!(msg.contains("private key")),
        other => panic!("Expected Auth error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_app_auth_with_invalid_key() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let key_path: PathBuf = temp_dir.path().join("key.pem");
    std::fs::write(&key_path, "not a pem key").unwrap();

    let config = config_with(AuthenticationConfig {
        auth_method: "app".to_string(),
        app_id: Some(12345),
        installation_id: Some(678),
        private_key_path: Some(key_path),
        ..Default::default()
    });

    let result = create_github_client(&config).await;

    assert!(matches!(
        result,
        Err(Error::GitHub(github_client::Error::AuthError(_)))
    ));
}

#[tokio::test]
async fn test_unknown_auth_method() {
    let config = config_with(AuthenticationConfig {
        auth_method: "keyring".to_string(),
        ..Default::default()
    });

    let result = create_github_client(&config).await;

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("keyring")),
        other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
    }
}
