//! Typed Jira connection settings.

use crate::platform::domain::{ConfigError, PlatformConfig};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;
use std::fmt;

/// Key holding the site URL.
pub const BASE_URL_KEY: &str = "base_url";
/// Key holding the account email.
pub const EMAIL_KEY: &str = "email";
/// Key holding the API token.
pub const TOKEN_KEY: &str = "token";

/// Parsed Jira configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraConfig {
    base_url: String,
    site: Url,
    email: String,
    token: String,
}

impl JiraConfig {
    /// Builds a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is blank or the URL lacks an
    /// `http://` or `https://` scheme.
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        PlatformConfig::new()
            .with(BASE_URL_KEY, base_url.into())
            .with(EMAIL_KEY, email.into())
            .with(TOKEN_KEY, token.into())
            .try_into()
    }

    /// Returns the site URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Renders the `Authorization` header for basic auth.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let credentials = format!("{}:{}", self.email, self.token);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Joins REST path segments onto the site URL, encoding each one.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> String {
        self.endpoint_with_query(segments, &[])
    }

    /// Like [`JiraConfig::endpoint`], appending encoded query pairs.
    #[must_use]
    pub fn endpoint_with_query(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = self.site.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["rest", "api", "2"])
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.into()
    }
}

impl TryFrom<&PlatformConfig> for JiraConfig {
    type Error = ConfigError;

    fn try_from(config: &PlatformConfig) -> Result<Self, Self::Error> {
        let raw_url = config.require_str(BASE_URL_KEY)?.trim();
        let base_url = raw_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: BASE_URL_KEY.to_owned(),
                reason: "must start with http:// or https://".to_owned(),
            });
        }
        let site = Url::parse(base_url).map_err(|err| ConfigError::Invalid {
            key: BASE_URL_KEY.to_owned(),
            reason: err.to_string(),
        })?;
        let email = config.require_str(EMAIL_KEY)?;
        let token = config.require_str(TOKEN_KEY)?;

        Ok(Self {
            base_url: base_url.to_owned(),
            site,
            email: email.trim().to_owned(),
            token: token.to_owned(),
        })
    }
}

impl TryFrom<PlatformConfig> for JiraConfig {
    type Error = ConfigError;

    fn try_from(config: PlatformConfig) -> Result<Self, Self::Error> {
        Self::try_from(&config)
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}
