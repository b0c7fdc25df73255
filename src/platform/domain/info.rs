//! Static self-description reported by each adapter.

use serde::{Deserialize, Serialize};

/// Name, type and endpoint of a platform adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Human-readable platform name.
    pub name: String,
    /// Registry key for the platform type.
    #[serde(rename = "type")]
    pub platform_type: String,
    /// Adapter or API version.
    pub version: String,
    /// Short description.
    pub description: String,
    /// Base URL the adapter talks to.
    pub base_url: String,
}
