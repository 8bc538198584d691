//! Formatting options for the Rhai stringifier.

use crate::StringifyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Formatting options. Every field is optional in TOML:
///
/// ```toml
/// quotes = true
/// none = "()"
/// suffix = ";"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringifyOptions {
    /// Emit object keys as quoted strings instead of bare identifiers.
    pub quotes: bool,
    /// Token written for null and absent values.
    pub none: String,
    /// Text appended once after the rendered root value.
    pub suffix: String,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            quotes: false,
            none: "()".to_string(),
            suffix: ";".to_string(),
        }
    }
}

impl StringifyOptions {
    pub fn from_toml_str(source: &str) -> Result<Self, StringifyError> {
        toml::from_str(source).map_err(|err| StringifyError::Config(err.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, StringifyError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| StringifyError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_toml_str(&contents)
    }

    pub fn with_quotes(mut self, quotes: bool) -> Self {
        self.quotes = quotes;
        self
    }

    pub fn with_none(mut self, none: impl Into<String>) -> Self {
        self.none = none.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}
