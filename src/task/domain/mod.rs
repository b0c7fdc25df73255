//! Canonical data model shared by every platform adapter.
//!
//! Tasks, projects and users are plain value objects: adapters create them
//! fresh on every inbound conversion and never mutate a returned entity in
//! place. Nothing here performs I/O or can fail at runtime.

mod error;
mod filter;
mod metadata;
mod platform;
mod project;
mod status;
mod task;
mod user;

pub use error::{ParsePlatformError, ParsePriorityError, ParseTaskStatusError};
pub use filter::TaskFilter;
pub use metadata::{Metadata, MetadataValue};
pub use platform::Platform;
pub use project::Project;
pub use status::{Priority, TaskStatus};
pub use task::{Task, TaskParts};
pub use user::User;
