//! Canonical task model shared across task platforms.
//!
//! Every platform adapter converts its native issue, project and user
//! records into the types in [`domain`]. Callers interact only with these
//! types; platform-specific fields survive in each entity's metadata bag.

pub mod domain;

#[cfg(test)]
mod tests;
