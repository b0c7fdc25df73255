//! Platform registry mapping platform types to client factories.
//!
//! Provides [`PlatformRegistry`], which validates opaque configuration and
//! builds [`PlatformClient`] instances on demand. The registry performs no
//! network I/O and keeps no per-client state.

use crate::platform::adapters::http::ReqwestTransport;
use crate::platform::adapters::jira::JiraFactory;
use crate::platform::adapters::linear::LinearFactory;
use crate::platform::domain::{PlatformConfig, PlatformEntry};
use crate::platform::error::{ErrorCode, PlatformError, PlatformResult};
use crate::platform::ports::{HttpTransport, PlatformClient, PlatformFactory};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Factories keyed by platform type.
///
/// Registration happens while the program starts up; lookups may then run
/// concurrently from any number of tasks.
#[derive(Clone, Default)]
pub struct PlatformRegistry {
    factories: HashMap<String, Arc<dyn PlatformFactory>>,
}

impl PlatformRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the Jira and Linear factories, both
    /// sending requests through `transport`.
    #[must_use]
    pub fn with_builtin_factories(transport: Arc<dyn HttpTransport>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JiraFactory::new(Arc::clone(&transport))));
        registry.register(Arc::new(LinearFactory::new(transport)));
        registry
    }

    /// Adds a factory. A later registration for the same type replaces the
    /// earlier one.
    pub fn register(&mut self, factory: Arc<dyn PlatformFactory>) {
        let platform_type = factory.platform_type().to_owned();
        if self
            .factories
            .insert(platform_type.clone(), factory)
            .is_some()
        {
            tracing::debug!(platform = %platform_type, "replaced platform factory");
        } else {
            tracing::debug!(platform = %platform_type, "registered platform factory");
        }
    }

    /// Validates `config` and builds a client for `platform_type`.
    ///
    /// # Errors
    ///
    /// Returns `platform_not_supported` for an unknown type and
    /// `invalid_config` wrapping the validator's complaint when `config` is
    /// incomplete or malformed.
    pub fn create(
        &self,
        platform_type: &str,
        config: &PlatformConfig,
    ) -> PlatformResult<Arc<dyn PlatformClient>> {
        let factory = self.factory(platform_type).ok_or_else(|| {
            tracing::warn!(platform = platform_type, "no factory registered");
            PlatformError::from_code(ErrorCode::PlatformNotSupported).with_platform(platform_type)
        })?;

        factory.validate_config(config).map_err(|err| {
            tracing::warn!(platform = platform_type, error = %err, "rejected platform configuration");
            PlatformError::from_code(ErrorCode::InvalidConfig)
                .with_platform(factory.platform_type())
                .with_cause(err)
        })?;

        let client = factory.create(config)?;
        tracing::debug!(platform = factory.platform_type(), "created platform client");
        Ok(client)
    }

    /// Builds a client from a workspace entry's type and merged settings.
    ///
    /// # Errors
    ///
    /// Fails like [`PlatformRegistry::create`].
    pub fn create_from_entry(&self, entry: &PlatformEntry) -> PlatformResult<Arc<dyn PlatformClient>> {
        self.create(&entry.platform_type, &entry.client_config())
    }

    /// Returns the factory registered for `platform_type`.
    #[must_use]
    pub fn factory(&self, platform_type: &str) -> Option<&Arc<dyn PlatformFactory>> {
        self.factories.get(platform_type.trim())
    }

    /// Returns whether a factory is registered for `platform_type`.
    #[must_use]
    pub fn is_supported(&self, platform_type: &str) -> bool {
        self.factory(platform_type).is_some()
    }

    /// Returns the registered platform types in sorted order.
    #[must_use]
    pub fn supported_platforms(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.keys().cloned().collect();
        types.sort_unstable();
        types
    }
}

impl fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformRegistry")
            .field("platforms", &self.supported_platforms())
            .finish()
    }
}

static DEFAULT_REGISTRY: LazyLock<PlatformRegistry> = LazyLock::new(|| {
    PlatformRegistry::with_builtin_factories(Arc::new(ReqwestTransport::new()))
});

/// Returns a process-wide registry with the built-in factories.
///
/// Intended for binaries assembling their dependencies at startup; library
/// code should accept a [`PlatformRegistry`] explicitly.
#[must_use]
pub fn default_registry() -> &'static PlatformRegistry {
    &DEFAULT_REGISTRY
}
