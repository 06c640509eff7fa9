//! GitHub webhook types.
//!
//! These types mirror the wire format of the repository hooks API
//! (`/repos/{owner}/{repo}/hooks`). They deliberately keep the hook configuration as
//! GitHub sends it, string flags included; translating to a declared shape is the job
//! of the caller.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

/// The hook name GitHub requires for repository webhooks.
pub const WEB_HOOK_NAME: &str = "web";

/// GitHub webhook representation.
///
/// Contains the complete webhook state as returned by GitHub, including its
/// GitHub-assigned ID.
///
/// # Examples
///
/// ```rust
/// use github_client::Webhook;
///
/// // Webhook typically received from GitHub API
/// let webhook_json = r#"{
///     "id": 12345,
///     "name": "web",
///     "url": "https://api.github.com/repos/my-org/my-repo/hooks/12345",
///     "active": true,
///     "events": ["push", "pull_request"],
///     "config": {
///         "url": "https://example.com/webhook",
///         "content_type": "json",
///         "insecure_ssl": "0"
///     },
///     "created_at": "2024-01-01T00:00:00Z",
///     "updated_at": "2024-01-01T00:00:00Z"
/// }"#;
///
/// let webhook: Webhook = serde_json::from_str(webhook_json).unwrap();
/// assert_eq!(webhook.id, 12345);
/// assert_eq!(webhook.config.url.as_deref(), Some("https://example.com/webhook"));
/// assert_eq!(webhook.events.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Webhook {
    /// GitHub-assigned webhook ID
    pub id: u64,

    /// Hook name, always `web` for repository webhooks
    #[serde(default)]
    pub name: Option<String>,

    /// API URL of the hook itself (not the delivery target)
    #[serde(default)]
    pub url: Option<String>,

    /// Whether the webhook is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// Events that trigger the webhook, in the order GitHub returns them
    #[serde(default)]
    pub events: Vec<String>,

    /// Webhook configuration details
    #[serde(default)]
    pub config: WebhookDetails,

    /// When the webhook was created
    #[serde(default)]
    pub created_at: Option<String>,

    /// When the webhook was last updated
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Webhook configuration map.
///
/// GitHub models the hook configuration as a flat key/value map. The recognised keys
/// get their own fields; anything else ends up in `extra` so that it survives a
/// read-modify-write cycle.
///
/// The `secret` is never printed by the `Debug` implementation.
///
/// # Examples
///
/// ```rust
/// use github_client::WebhookDetails;
///
/// let details = WebhookDetails {
///     url: Some("https://example.com/webhook".to_string()),
///     content_type: Some("json".to_string()),
///     insecure_ssl: Some("0".to_string()),
///     ..Default::default()
/// };
///
/// let json = serde_json::to_value(&details).unwrap();
/// assert_eq!(json["insecure_ssl"], "0");
/// assert!(json.get("secret").is_none());
/// ```
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookDetails {
    /// Delivery target URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Payload content type (`json` or `form`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Whether to skip SSL certificate verification.
    ///
    /// GitHub uses the string `"0"` (verify) or `"1"` (skip). Some API versions send a
    /// bare number instead, which is normalized to its string form on deserialization.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_flag"
    )]
    pub insecure_ssl: Option<String>,

    /// Shared secret used to sign deliveries. GitHub masks it on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Configuration keys this client does not know about
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl fmt::Debug for WebhookDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookDetails")
            .field("url", &self.url)
            .field("content_type", &self.content_type)
            .field("insecure_ssl", &self.insecure_ssl)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("extra", &self.extra)
            .finish()
    }
}

/// Request body for creating or editing a repository webhook.
///
/// Editing replaces the configuration, the event list and the active flag as a whole.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    /// Hook name; only sent on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Webhook configuration
    pub config: WebhookDetails,

    /// Events that trigger the webhook
    pub events: Vec<String>,

    /// Whether the webhook is active
    pub active: bool,
}

/// Deserializes an `insecure_ssl` style flag sent either as a string or as a number.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Text(String),
        Number(i64),
        Bool(bool),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Text(s)) => Some(s),
        Some(Flag::Number(n)) => Some(n.to_string()),
        Some(Flag::Bool(b)) => Some(if b { "1" } else { "0" }.to_string()),
        None => None,
    })
}
