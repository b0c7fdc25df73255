//! Registry factory for Jira clients.

use super::{JiraClient, JiraConfig};
use crate::platform::adapters::SharedClock;
use crate::platform::domain::{ConfigError, PlatformConfig};
use crate::platform::error::{PlatformError, PlatformResult};
use crate::platform::ports::{HttpTransport, PlatformClient, PlatformFactory};
use crate::task::domain::Platform;
use mockable::DefaultClock;
use std::sync::Arc;

/// Builds [`JiraClient`] instances sharing one transport and clock.
#[derive(Clone)]
pub struct JiraFactory {
    transport: Arc<dyn HttpTransport>,
    clock: SharedClock,
}

impl JiraFactory {
    /// Creates a factory using the system clock.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_clock(transport, Arc::new(DefaultClock))
    }

    /// Creates a factory with an explicit clock.
    #[must_use]
    pub fn with_clock(transport: Arc<dyn HttpTransport>, clock: SharedClock) -> Self {
        Self { transport, clock }
    }
}

impl PlatformFactory for JiraFactory {
    fn platform_type(&self) -> &'static str {
        Platform::Jira.as_str()
    }

    fn name(&self) -> &'static str {
        "Jira"
    }

    fn validate_config(&self, config: &PlatformConfig) -> Result<(), ConfigError> {
        JiraConfig::try_from(config).map(|_| ())
    }

    fn create(&self, config: &PlatformConfig) -> PlatformResult<Arc<dyn PlatformClient>> {
        let parsed = JiraConfig::try_from(config).map_err(|err| {
            PlatformError::invalid_config(err.to_string())
                .with_platform(Platform::Jira.as_str())
                .with_cause(err)
        })?;
        Ok(Arc::new(JiraClient::new(
            parsed,
            Arc::clone(&self.transport),
            Arc::clone(&self.clock),
        )))
    }
}
