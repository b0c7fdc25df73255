//! Serde model for a workspace's configured platforms.
//!
//! Loading and saving the on-disk file belongs to the caller; these types
//! only describe its shape and flatten one entry into the opaque mapping a
//! platform factory consumes.

use super::PlatformConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level workspace configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Configuration format version.
    #[serde(default)]
    pub version: String,
    /// Workspace name.
    #[serde(default)]
    pub workspace: String,
    /// Configured platforms keyed by local name.
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformEntry>,
    /// Defaults applied when a command names no platform.
    #[serde(default)]
    pub defaults: Defaults,
}

impl WorkspaceConfig {
    /// Returns the names of enabled platforms in sorted order.
    #[must_use]
    pub fn enabled_platforms(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .filter(|(_, entry)| entry.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns the entry registered under `name`.
    #[must_use]
    pub fn platform(&self, name: &str) -> Option<&PlatformEntry> {
        self.platforms.get(name)
    }

    /// Returns the default platform entry, when one is configured.
    #[must_use]
    pub fn default_platform(&self) -> Option<&PlatformEntry> {
        self.defaults
            .platform
            .as_deref()
            .and_then(|name| self.platform(name))
    }
}

/// One configured platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// Registry key of the adapter (`jira`, `linear`).
    #[serde(rename = "type")]
    pub platform_type: String,
    /// Whether the platform participates in workspace commands.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Secret values such as tokens.
    #[serde(default)]
    pub credentials: BTreeMap<String, String>,
    /// Non-secret settings such as base URLs.
    #[serde(default)]
    pub settings: PlatformConfig,
}

impl PlatformEntry {
    /// Creates an enabled entry with no credentials or settings.
    #[must_use]
    pub fn new(platform_type: impl Into<String>) -> Self {
        Self {
            platform_type: platform_type.into(),
            enabled: true,
            credentials: BTreeMap::new(),
            settings: PlatformConfig::new(),
        }
    }

    /// Adds a credential.
    #[must_use]
    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(key.into(), value.into());
        self
    }

    /// Adds a setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.settings.insert(key, value);
        self
    }

    /// Flattens credentials then settings into one mapping.
    ///
    /// Settings override credentials on key collisions.
    #[must_use]
    pub fn client_config(&self) -> PlatformConfig {
        let mut config: PlatformConfig = self
            .credentials
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        config.extend_from(&self.settings);
        config
    }
}

const fn enabled_by_default() -> bool {
    true
}

/// Workspace-wide defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Platform name used when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Project used when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Output format hint for presentation layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}
