//! Platform abstraction layer.
//!
//! The layer follows hexagonal architecture:
//!
//! - Shared value types in [`domain`]
//! - The error taxonomy in [`error`]
//! - Port contracts in [`ports`]
//! - Jira, Linear and transport adapters in [`adapters`]
//! - The platform registry in [`services`]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{ErrorCode, PlatformError, PlatformResult};

#[cfg(test)]
mod tests;
