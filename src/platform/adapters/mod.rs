//! Adapter implementations of the platform ports.

pub mod auth;
pub mod http;
pub mod jira;
pub mod linear;

use mockable::Clock;
use std::sync::Arc;

/// Clock shared by a client and the factory that built it.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;
