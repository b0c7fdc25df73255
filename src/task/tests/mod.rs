//! Unit tests for the canonical task model.
