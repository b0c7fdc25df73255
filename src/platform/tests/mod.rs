//! Unit tests for the platform layer.
//!
//! Adapter tests drive the real clients through the scripted transport, so
//! field mapping is exercised from raw platform JSON to canonical values.

mod fixtures;
mod jira_client_tests;
mod linear_mapping_tests;
