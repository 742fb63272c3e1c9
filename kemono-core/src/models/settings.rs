//! User settings handed to a source when it is enabled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-form key/value settings chosen by the user in the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSettings(HashMap<String, String>);

impl SourceSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the value for `key` parsed as a boolean ("true"/"false").
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Sets a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of settings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no settings are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for SourceSettings {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}
