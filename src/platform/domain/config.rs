//! Opaque adapter configuration.
//!
//! Credentials and settings travel as one flat string-keyed mapping. Each
//! adapter declares which keys it requires and parses the mapping into its
//! own typed configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while reading typed values from a [`PlatformConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent.
    #[error("{0} is required")]
    Missing(String),

    /// A key holds a value of the wrong shape.
    #[error("{key} must be a {expected}")]
    WrongType {
        /// Offending key.
        key: String,
        /// Expected value shape.
        expected: &'static str,
    },

    /// A required string key is empty.
    #[error("{0} must not be empty")]
    Empty(String),

    /// A key holds a syntactically invalid value.
    #[error("{key} is invalid: {reason}")]
    Invalid {
        /// Offending key.
        key: String,
        /// Description of the problem.
        reason: String,
    },
}

/// Flat, opaque configuration mapping handed to a platform factory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformConfig(BTreeMap<String, Value>);

impl PlatformConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces one entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces one entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Copies every entry of `other` over this configuration.
    pub fn extend_from(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns the raw value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns whether no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Reads an optional string value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongType`] when the key holds a non-string.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        self.0.get(key).map_or(Ok(None), |value| {
            value.as_str().map(Some).ok_or_else(|| ConfigError::WrongType {
                key: key.to_owned(),
                expected: "string",
            })
        })
    }

    /// Reads a required, non-empty string value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when absent, [`ConfigError::WrongType`]
    /// for a non-string value and [`ConfigError::Empty`] for blank text.
    pub fn require_str(&self, key: &str) -> Result<&str, ConfigError> {
        let value = self
            .get_str(key)?
            .ok_or_else(|| ConfigError::Missing(key.to_owned()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::Empty(key.to_owned()));
        }
        Ok(value)
    }

    /// Reads an optional boolean value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongType`] when the key holds a non-boolean.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.0.get(key).map_or(Ok(None), |value| {
            value.as_bool().map(Some).ok_or_else(|| ConfigError::WrongType {
                key: key.to_owned(),
                expected: "boolean",
            })
        })
    }

    /// Reads an optional unsigned integer value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongType`] when the key holds anything other
    /// than a non-negative integer.
    pub fn get_u64(&self, key: &str) -> Result<Option<u64>, ConfigError> {
        self.0.get(key).map_or(Ok(None), |value| {
            value.as_u64().map(Some).ok_or_else(|| ConfigError::WrongType {
                key: key.to_owned(),
                expected: "non-negative integer",
            })
        })
    }
}

impl<K, V> FromIterator<(K, V)> for PlatformConfig
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<Map<String, Value>> for PlatformConfig {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for PlatformConfig {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            Value::Null => Ok(Self::new()),
            _ => Err(ConfigError::WrongType {
                key: "config".to_owned(),
                expected: "object",
            }),
        }
    }
}
