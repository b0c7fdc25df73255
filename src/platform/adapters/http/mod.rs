//! HTTP transport adapters and response classification.

pub mod classify;
pub mod live;
pub mod memory;

pub use live::{DEFAULT_TIMEOUT, ReqwestTransport};
pub use memory::ScriptedTransport;
