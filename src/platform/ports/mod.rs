//! Port contracts for platform adapters.
//!
//! [`PlatformClient`] is the only surface callers depend on.
//! [`HttpTransport`] isolates wire I/O so adapters can be exercised without a
//! network.

pub mod auth;
pub mod client;
pub mod factory;
pub mod transport;

pub use auth::AuthProvider;
pub use client::PlatformClient;
pub use factory::PlatformFactory;
#[cfg(test)]
pub use transport::MockHttpTransport;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
