//! Shared world state for platform registry BDD scenarios.

use opentask::platform::PlatformError;
use opentask::platform::adapters::http::ScriptedTransport;
use opentask::platform::domain::PlatformEntry;
use opentask::platform::ports::PlatformClient;
use opentask::platform::services::PlatformRegistry;
use opentask::task::domain::Task;
use rstest::fixture;
use std::sync::Arc;

/// Scenario world for registry behaviour tests.
pub struct RegistryWorld {
    /// Transport shared by every client the registry builds.
    pub transport: ScriptedTransport,
    /// Registry under test.
    pub registry: PlatformRegistry,
    /// Workspace entry the scenario configures.
    pub entry: Option<PlatformEntry>,
    /// Client built by the last successful creation.
    pub client: Option<Arc<dyn PlatformClient>>,
    /// Error from the last failed creation.
    pub creation_error: Option<PlatformError>,
    /// Outcome of the last fetch.
    pub fetched: Option<Result<Task, PlatformError>>,
}

impl RegistryWorld {
    /// Creates a world with an empty script and an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: ScriptedTransport::new(),
            registry: PlatformRegistry::new(),
            entry: None,
            client: None,
            creation_error: None,
            fetched: None,
        }
    }

    /// Records the outcome of a client creation.
    pub fn record_creation(&mut self, outcome: Result<Arc<dyn PlatformClient>, PlatformError>) {
        match outcome {
            Ok(client) => self.client = Some(client),
            Err(err) => self.creation_error = Some(err),
        }
    }
}

impl Default for RegistryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistryWorld {
    RegistryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
