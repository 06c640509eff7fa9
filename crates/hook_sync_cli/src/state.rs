//! Tracked webhook state.
//!
//! The state file maps the name a webhook is managed under to the last known
//! [`TrackedWebhook`]. It is what lets a later invocation find the webhook it created
//! earlier, and it is the only place the webhook secret is kept between runs.
//!
//! The file is plain JSON and contains secrets; treat it like any other credential
//! file.

use std::{collections::BTreeMap, fs, path::Path};

use hook_sync_core::TrackedWebhook;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

/// Webhooks tracked by the CLI, keyed by name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    webhooks: BTreeMap<String, TrackedWebhook>,
}

impl StateFile {
    /// Loads the state file. A missing file is an empty state.
    ///
    /// # Errors
    ///
    /// Returns `Error::State` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            debug!("No state file at {:?}, starting with an empty state", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::State(format!("Failed to read state file {:?}: {}", path, e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::State(format!("Failed to parse state file {:?}: {}", path, e)))
    }

    /// Writes the state file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::State` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::State(format!("Failed to serialize state: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::State(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::State(format!("Failed to write state file {:?}: {}", path, e)))?;

        debug!(count = self.webhooks.len(), "State saved to {:?}", path);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TrackedWebhook> {
        self.webhooks.get(name)
    }

    /// Finds a tracked webhook by hook ID and repository, returning its name as well.
    pub fn find(&self, id: &str, repository: &str) -> Option<(&str, &TrackedWebhook)> {
        self.webhooks
            .iter()
            .find(|(_, tracked)| tracked.id == id && tracked.spec.repository == repository)
            .map(|(name, tracked)| (name.as_str(), tracked))
    }

    /// Records `tracked` under `name`, returning the entry it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        tracked: TrackedWebhook,
    ) -> Option<TrackedWebhook> {
        self.webhooks.insert(name.into(), tracked)
    }

    pub fn remove(&mut self, name: &str) -> Option<TrackedWebhook> {
        self.webhooks.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackedWebhook)> {
        self.webhooks
            .iter()
            .map(|(name, tracked)| (name.as_str(), tracked))
    }

    pub fn len(&self) -> usize {
        self.webhooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.webhooks.is_empty()
    }

    pub fn clear(&mut self) {
        self.webhooks.clear();
    }
}
