//! Origin platform tag carried by every canonical entity.

use super::ParsePlatformError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task-tracking platforms known to the canonical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Linear issues.
    #[serde(rename = "linear")]
    Linear,
    /// Atlassian Jira issues.
    #[serde(rename = "jira")]
    Jira,
    /// Slack (reserved for future backends).
    #[serde(rename = "slack")]
    Slack,
    /// GitHub issues (reserved for future backends).
    #[serde(rename = "github")]
    GitHub,
}

impl Platform {
    /// Returns the platform tag in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Jira => "jira",
            Self::Slack => "slack",
            Self::GitHub => "github",
        }
    }
}

impl TryFrom<&str> for Platform {
    type Error = ParsePlatformError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "linear" => Ok(Self::Linear),
            "jira" => Ok(Self::Jira),
            "slack" => Ok(Self::Slack),
            "github" => Ok(Self::GitHub),
            _ => Err(ParsePlatformError(value.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
