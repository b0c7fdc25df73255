//! Step definitions for platform registry scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
