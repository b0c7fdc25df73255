//! Factory contract the registry uses to build clients.

use super::PlatformClient;
use crate::platform::domain::{ConfigError, PlatformConfig};
use crate::platform::error::PlatformResult;
use std::sync::Arc;

/// Stateless constructor for one platform type.
pub trait PlatformFactory: Send + Sync {
    /// Registry key, for example `jira`.
    fn platform_type(&self) -> &'static str;

    /// Human-readable platform name.
    fn name(&self) -> &'static str;

    /// Checks that `config` carries every required key in the right shape.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    fn validate_config(&self, config: &PlatformConfig) -> Result<(), ConfigError>;

    /// Builds a client. No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns `invalid_config` when `config` cannot be parsed.
    fn create(&self, config: &PlatformConfig) -> PlatformResult<Arc<dyn PlatformClient>>;
}
