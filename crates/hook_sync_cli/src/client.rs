//! GitHub client construction from the CLI configuration.

use std::fs;

use github_client::{
    authenticate_with_access_token, create_app_client, create_token_client, GitHubClient,
};
use secrecy::SecretString;
use tracing::{debug, instrument};

use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Creates an authenticated GitHub client for the configured authentication method.
///
/// # Errors
///
/// Returns `Error::Auth` when the credentials are missing or unreadable,
/// `Error::Config` for an unknown method or incomplete app settings, and
/// `Error::GitHub` when the client cannot be built.
#[instrument(skip(config), fields(owner = %config.github.owner, auth_method = %config.authentication.auth_method))]
pub async fn create_github_client(config: &AppConfig) -> Result<GitHubClient, Error> {
    let auth = &config.authentication;

    match auth.auth_method.as_str() {
        "token" => {
            let token = std::env::var(&auth.token_env).map_err(|_| {
                Error::Auth(format!(
                    "The environment variable '{}' holding the GitHub token is not set",
                    auth.token_env
                ))
            })?;
            debug!(token_env = %auth.token_env, "Using personal access token");

            let octocrab =
                create_token_client(&SecretString::from(token), config.github.api_url.as_deref())?;
            Ok(GitHubClient::new(octocrab))
        }
        "app" => {
            let app_id = auth.app_id.ok_or_else(|| missing_app_setting("app_id"))?;
            let installation_id = auth
                .installation_id
                .ok_or_else(|| missing_app_setting("installation_id"))?;
            let key_path = auth
                .private_key_path
                .as_ref()
                .ok_or_else(|| missing_app_setting("private_key_path"))?;

            let private_key = fs::read_to_string(key_path).map_err(|e| {
                Error::Auth(format!(
                    "Failed to read the GitHub App private key from {:?}: {}",
                    key_path, e
                ))
            })?;

            let app_client = create_app_client(app_id, &private_key).await?;
            let installation_client =
                authenticate_with_access_token(&app_client, installation_id, &config.github.owner)
                    .await?;
            Ok(GitHubClient::new(installation_client))
        }
        other => Err(Error::Config(format!(
            "Unknown authentication method '{}'. Expected 'token' or 'app'",
            other
        ))),
    }
}

fn missing_app_setting(key: &str) -> Error {
    Error::Config(format!(
        "authentication.{} is required when auth_method is 'app'",
        key
    ))
}
