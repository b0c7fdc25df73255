//! Orchestration services for platform clients.

pub mod registry;

pub use registry::{PlatformRegistry, default_registry};
