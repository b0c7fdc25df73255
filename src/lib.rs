//! Opentask: one task model across many task-tracking platforms.
//!
//! Callers build a [`PlatformClient`](platform::ports::PlatformClient)
//! through the [`PlatformRegistry`](platform::services::PlatformRegistry)
//! from a platform type and an opaque configuration mapping, then create,
//! read, update, delete and list tasks without knowing which backend serves
//! them. Each adapter converts its platform's issues, projects and users
//! into the canonical types in [`task::domain`] and back, preserving native
//! fields in metadata so later updates can address the origin platform.

pub mod platform;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
