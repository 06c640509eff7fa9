//! Drift detection between a declared webhook and the state observed on GitHub.
//!
//! Fields are compared with the rules GitHub actually applies to them: the event list
//! is a set, so ordering and duplicates never count as drift, and the secret is never
//! compared because GitHub does not return it.

use std::fmt;

use crate::WebhookSpec;

#[cfg(test)]
#[path = "drift_tests.rs"]
mod tests;

/// A webhook attribute that can drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DriftField {
    Url,
    ContentType,
    InsecureSsl,
    Active,
    Events,
}

impl DriftField {
    /// Returns the attribute path as written in a webhook declaration.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftField::Url => "configuration.url",
            DriftField::ContentType => "configuration.content_type",
            DriftField::InsecureSsl => "configuration.insecure_ssl",
            DriftField::Active => "active",
            DriftField::Events => "events",
        }
    }
}

impl fmt::Display for DriftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attribute whose declared and observed values differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: DriftField,
    pub declared: String,
    pub observed: String,
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: \"{}\" => \"{}\"",
            self.field, self.declared, self.observed
        )
    }
}

/// Compares a declared webhook with an observed one.
///
/// Returns one entry per drifted attribute, in a fixed order. The repository is not
/// compared here; moving a webhook to another repository is a replacement, not drift.
///
/// # Examples
///
/// ```rust
/// use hook_sync_core::{drift, WebhookConfiguration, WebhookSpec};
///
/// let declared = WebhookSpec {
///     repository: "foo".to_string(),
///     events: vec!["push".to_string(), "issues".to_string()],
///     active: true,
///     configuration: WebhookConfiguration::new("https://example.com/webhook"),
/// };
///
/// let mut observed = declared.clone();
/// observed.events.reverse();
/// assert!(drift::diff(&declared, &observed).is_empty());
///
/// observed.active = false;
/// let changes = drift::diff(&declared, &observed);
/// assert_eq!(changes[0].to_string(), r#"active: "true" => "false""#);
/// ```
pub fn diff(declared: &WebhookSpec, observed: &WebhookSpec) -> Vec<FieldDiff> {
    let mut changes = Vec::new();

    let declared_config = &declared.configuration;
    let observed_config = &observed.configuration;

    if declared_config.url != observed_config.url {
        changes.push(FieldDiff {
            field: DriftField::Url,
            declared: declared_config.url.clone(),
            observed: observed_config.url.clone(),
        });
    }

    if declared_config.content_type != observed_config.content_type {
        changes.push(FieldDiff {
            field: DriftField::ContentType,
            declared: declared_config.content_type.to_string(),
            observed: observed_config.content_type.to_string(),
        });
    }

    if declared_config.insecure_ssl != observed_config.insecure_ssl {
        changes.push(FieldDiff {
            field: DriftField::InsecureSsl,
            declared: declared_config.insecure_ssl.to_string(),
            observed: observed_config.insecure_ssl.to_string(),
        });
    }

    if declared.active != observed.active {
        changes.push(FieldDiff {
            field: DriftField::Active,
            declared: declared.active.to_string(),
            observed: observed.active.to_string(),
        });
    }

    let declared_events = declared.event_set();
    let observed_events = observed.event_set();
    if declared_events != observed_events {
        changes.push(FieldDiff {
            field: DriftField::Events,
            declared: join_events(declared_events),
            observed: join_events(observed_events),
        });
    }

    changes
}

fn join_events<'a>(events: impl IntoIterator<Item = &'a str>) -> String {
    events.into_iter().collect::<Vec<_>>().join(",")
}
