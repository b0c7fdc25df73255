//! Typed Linear connection settings.

use crate::platform::domain::{ConfigError, PlatformConfig};
use std::fmt;

/// Public GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";
/// Key holding the API token.
pub const TOKEN_KEY: &str = "token";
/// Key holding an optional endpoint override.
pub const BASE_URL_KEY: &str = "base_url";

/// Parsed Linear configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct LinearConfig {
    token: String,
    endpoint: String,
}

impl LinearConfig {
    /// Builds a configuration against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] when the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        PlatformConfig::new().with(TOKEN_KEY, token.into()).try_into()
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Renders the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl TryFrom<&PlatformConfig> for LinearConfig {
    type Error = ConfigError;

    fn try_from(config: &PlatformConfig) -> Result<Self, Self::Error> {
        let token = config.require_str(TOKEN_KEY)?.trim().to_owned();
        let endpoint = match config.get_str(BASE_URL_KEY)?.map(str::trim) {
            None | Some("") => DEFAULT_ENDPOINT.to_owned(),
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                url.to_owned()
            }
            Some(_) => {
                return Err(ConfigError::Invalid {
                    key: BASE_URL_KEY.to_owned(),
                    reason: "must start with http:// or https://".to_owned(),
                });
            }
        };
        Ok(Self { token, endpoint })
    }
}

impl TryFrom<PlatformConfig> for LinearConfig {
    type Error = ConfigError;

    fn try_from(config: PlatformConfig) -> Result<Self, Self::Error> {
        Self::try_from(&config)
    }
}

impl fmt::Debug for LinearConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
