//! Translation between the declared webhook configuration and GitHub's hook config map.
//!
//! GitHub keeps the hook configuration as a flat map of strings. Two of the recognised
//! keys change type on the way through: `insecure_ssl` is a boolean in the declared
//! shape but `"0"` or `"1"` on the wire, and `content_type` is an enum on one side and a
//! string on the other. Unrecognised keys are carried through untouched in both
//! directions, keeping their JSON type.
//!
//! The secret only ever travels outwards. GitHub masks it on read, so the refreshed
//! configuration carries whatever secret the caller retained from before.

use std::collections::BTreeMap;

use github_client::{Webhook, WebhookDetails, WebhookPayload, WEB_HOOK_NAME};
use serde_json::Value;

use crate::{ContentType, ReconcileError, ReconcileResult, WebhookConfiguration, WebhookSpec};

#[cfg(test)]
#[path = "config_codec_tests.rs"]
mod tests;

pub const URL_KEY: &str = "url";
pub const CONTENT_TYPE_KEY: &str = "content_type";
pub const SECRET_KEY: &str = "secret";
pub const INSECURE_SSL_KEY: &str = "insecure_ssl";

/// Keys with a dedicated field on both sides of the mapping.
pub const KNOWN_KEYS: [&str; 4] = [URL_KEY, CONTENT_TYPE_KEY, SECRET_KEY, INSECURE_SSL_KEY];

/// Converts a declared configuration to the config map sent to GitHub.
///
/// `content_type` and `insecure_ssl` are always present in the result. The secret is
/// only included when it is set and non-empty. Extra keys never override a recognised
/// key.
///
/// # Examples
///
/// ```rust
/// use hook_sync_core::{config_codec::to_remote_config, WebhookConfiguration};
///
/// let mut config = WebhookConfiguration::new("https://example.com/webhook");
/// config.insecure_ssl = true;
///
/// let details = to_remote_config(&config);
/// assert_eq!(details.insecure_ssl.as_deref(), Some("1"));
/// assert_eq!(details.content_type.as_deref(), Some("form"));
/// assert!(details.secret.is_none());
/// ```
pub fn to_remote_config(config: &WebhookConfiguration) -> WebhookDetails {
    let extra = config
        .extra
        .iter()
        .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    WebhookDetails {
        url: Some(config.url.clone()),
        content_type: Some(config.content_type.as_str().to_string()),
        insecure_ssl: Some(encode_flag(config.insecure_ssl).to_string()),
        secret: config.secret.clone().filter(|s| !s.is_empty()),
        extra,
    }
}

/// Converts a config map read from GitHub back to the declared shape.
///
/// Missing `content_type` and `insecure_ssl` take their defaults (`form` and `false`).
/// Whatever GitHub sends for the secret is ignored; the result carries
/// `retained_secret`.
///
/// # Errors
///
/// Returns `ReconcileError::InvalidRemoteConfig` when a recognised key holds a value
/// that has no declared equivalent.
pub fn from_remote_config(
    details: &WebhookDetails,
    retained_secret: Option<&str>,
) -> ReconcileResult<WebhookConfiguration> {
    let content_type = match details.content_type.as_deref() {
        None => ContentType::default(),
        Some(value) => value
            .parse::<ContentType>()
            .map_err(|_| ReconcileError::invalid_remote_config(CONTENT_TYPE_KEY, value))?,
    };

    let insecure_ssl = match details.insecure_ssl.as_deref() {
        None => false,
        Some(value) => decode_flag(value)
            .ok_or_else(|| ReconcileError::invalid_remote_config(INSECURE_SSL_KEY, value))?,
    };

    let extra: BTreeMap<String, Value> = details
        .extra
        .iter()
        .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(WebhookConfiguration {
        url: details.url.clone().unwrap_or_default(),
        content_type,
        secret: retained_secret.map(str::to_string),
        insecure_ssl,
        extra,
    })
}

/// Builds the request body for creating a webhook from its declaration.
pub fn to_remote_payload(spec: &WebhookSpec) -> WebhookPayload {
    WebhookPayload {
        name: Some(WEB_HOOK_NAME.to_string()),
        config: to_remote_config(&spec.configuration),
        events: spec.events.clone(),
        active: spec.active,
    }
}

/// Builds the request body for editing a webhook. The hook name cannot change, so it is
/// left out.
pub fn to_update_payload(spec: &WebhookSpec) -> WebhookPayload {
    WebhookPayload {
        name: None,
        ..to_remote_payload(spec)
    }
}

/// Converts a webhook read from GitHub into a refreshed spec for `repository`.
///
/// # Errors
///
/// Propagates the errors of [`from_remote_config`].
pub fn from_remote_webhook(
    webhook: &Webhook,
    repository: &str,
    retained_secret: Option<&str>,
) -> ReconcileResult<WebhookSpec> {
    Ok(WebhookSpec {
        repository: repository.to_string(),
        events: webhook.events.clone(),
        active: webhook.active,
        configuration: from_remote_config(&webhook.config, retained_secret)?,
    })
}

fn encode_flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn decode_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
