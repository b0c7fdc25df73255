//! Canonical user snapshot.

use super::{Metadata, MetadataValue, Platform};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A platform account as seen through the canonical model.
///
/// Tasks reference users by snapshot; they never own the account. The
/// metadata bag holds the platform-native account id needed to assign the
/// user on later calls (`jira_account_id`, `linear_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    platform: Platform,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
}

impl User {
    /// Creates an active user stamped with the current clock time.
    #[must_use]
    pub fn new<C: Clock + ?Sized>(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        platform: Platform,
        clock: &C,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            username: None,
            avatar: None,
            platform,
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
            metadata: Metadata::new(),
        }
    }

    /// Sets the login handle.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = non_empty(username.into());
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = non_empty(avatar.into());
        self
    }

    /// Sets whether the account is active.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
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

    /// Returns the full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the login handle, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns the origin platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns whether the account is active.
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

    /// Returns the best human-readable label: name, then username, then email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username,
            _ => &self.email,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
