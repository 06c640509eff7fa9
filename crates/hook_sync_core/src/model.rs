//! Declared webhook types.
//!
//! [`WebhookSpec`] is the shape an operator writes down: the owning repository, the
//! subscribed events, the active flag and exactly one [`WebhookConfiguration`]. It is
//! also the shape refreshed state is reported in, so that declared and observed values
//! can be compared field by field.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{identity, ReconcileError, ReconcileResult};

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

/// Payload encoding GitHub uses when delivering events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    #[default]
    Form,
}

impl ContentType {
    /// Returns the value GitHub uses for this content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "json",
            ContentType::Form => "form",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ContentType::Json),
            "form" => Ok(ContentType::Form),
            other => Err(format!("unknown content type '{}'", other)),
        }
    }
}

/// Declared webhook.
///
/// # Examples
///
/// ```rust
/// use hook_sync_core::{ContentType, WebhookSpec};
///
/// let spec: WebhookSpec = toml::from_str(r#"
///     repository = "foo"
///     events = ["pull_request"]
///
///     [configuration]
///     url = "https://example.com/webhook"
/// "#).unwrap();
///
/// assert!(spec.active);
/// assert_eq!(spec.configuration.content_type, ContentType::Form);
/// assert!(!spec.configuration.insecure_ssl);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSpec {
    /// Name of the owning repository; immutable once the webhook exists
    pub repository: String,

    /// Events that trigger the webhook; compared as a set
    pub events: Vec<String>,

    /// Whether the webhook is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// Delivery configuration
    pub configuration: WebhookConfiguration,
}

fn default_active() -> bool {
    true
}

impl WebhookSpec {
    /// Checks the declared webhook before anything is sent to GitHub.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Validation` when the repository name is empty, the event
    /// list is empty or contains an empty name, or the URL does not parse.
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.repository.trim().is_empty() {
            return Err(ReconcileError::validation(
                "repository",
                "repository name cannot be empty",
            ));
        }

        if self.events.is_empty() {
            return Err(ReconcileError::validation(
                "events",
                "at least one event is required",
            ));
        }

        if self.events.iter().any(|e| e.trim().is_empty()) {
            return Err(ReconcileError::validation(
                "events",
                "event names cannot be empty",
            ));
        }

        Url::parse(&self.configuration.url).map_err(|e| {
            ReconcileError::validation(
                "configuration.url",
                format!("'{}' is not a valid URL: {}", self.configuration.url, e),
            )
        })?;

        Ok(())
    }

    /// Returns the events as a set, which is how they are compared.
    pub fn event_set(&self) -> BTreeSet<&str> {
        self.events.iter().map(String::as_str).collect()
    }
}

/// Delivery configuration of a webhook.
///
/// `secret` is write-only: GitHub never returns it, so the value held here after a
/// refresh is the one the caller retained, not one that was observed. The `Debug`
/// implementation never prints it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfiguration {
    /// Delivery target URL
    pub url: String,

    /// Payload content type
    #[serde(default)]
    pub content_type: ContentType,

    /// Shared secret used to sign deliveries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Whether to skip TLS certificate verification when delivering
    #[serde(default)]
    pub insecure_ssl: bool,

    /// Configuration keys without a dedicated field, passed through as-is
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl WebhookConfiguration {
    /// Creates a configuration with the documented defaults for everything but the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: ContentType::default(),
            secret: None,
            insecure_ssl: false,
            extra: BTreeMap::new(),
        }
    }
}

impl fmt::Debug for WebhookConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfiguration")
            .field("url", &self.url)
            .field("content_type", &self.content_type)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("insecure_ssl", &self.insecure_ssl)
            .field("extra", &self.extra)
            .finish()
    }
}

/// A webhook the caller keeps track of: the identifier GitHub assigned plus the last
/// known state.
///
/// This is the unit of persisted state. The reconciler never stores it; the caller
/// passes it back in, which is also how the write-only secret is carried from one
/// invocation to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedWebhook {
    /// Opaque identifier, the decimal hook ID
    pub id: String,

    /// Last known state of the webhook
    pub spec: WebhookSpec,
}

impl TrackedWebhook {
    /// Returns the numeric hook ID.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::InvalidIdentifier` if the stored ID is malformed.
    pub fn hook_id(&self) -> ReconcileResult<u64> {
        identity::decode_id(&self.id)
    }

    /// Returns the composite `<repository>/<hook id>` form used for import.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::InvalidIdentifier` if the stored ID is malformed.
    pub fn import_id(&self) -> ReconcileResult<String> {
        Ok(identity::encode_import_id(
            &self.spec.repository,
            self.hook_id()?,
        ))
    }
}
