//! Value types shared by platform ports and adapters.

mod auth;
mod config;
mod context;
mod info;
mod workspace;

pub use auth::AuthToken;
pub use config::{ConfigError, PlatformConfig};
pub use context::RequestContext;
pub use info::PlatformInfo;
pub use workspace::{Defaults, PlatformEntry, WorkspaceConfig};
