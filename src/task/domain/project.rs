//! Canonical project snapshot.

use super::{Metadata, MetadataValue, Platform};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A project, team board or Jira project as seen through the canonical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    platform: Platform,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
}

impl Project {
    /// Creates an active project stamped with the current clock time.
    #[must_use]
    pub fn new<C: Clock + ?Sized>(
        id: impl Into<String>,
        name: impl Into<String>,
        platform: Platform,
        clock: &C,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            key: None,
            platform,
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
            metadata: Metadata::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the short human code (for example a Jira project key).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let value = key.into();
        self.key = (!value.is_empty()).then_some(value);
        self
    }

    /// Replaces both timestamps with values reported by the platform.
    #[must_use]
    pub const fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Adds a metadata entry without touching timestamps.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the short human code, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the origin platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns whether the project is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the metadata bag.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Reads a metadata value.
    #[must_use]
    pub fn get_metadata(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// Stores a metadata value and bumps the update timestamp.
    pub fn set_metadata<C: Clock + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
        clock: &C,
    ) {
        self.metadata.insert(key, value);
        self.updated_at = clock.utc();
    }

    /// Returns the key when present, otherwise the name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }
}
