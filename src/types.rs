//! Common types used throughout viewgen
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// View Key
// ============================================================================

/// Normalized source path of a view, e.g. `components/card/Card.hbs`.
///
/// Leading separators and `./` are stripped and backslashes become `/`, so
/// absolute and relative spellings of the same view compare equal. The
/// same normalization applies when a key is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct ViewKey(String);

impl ViewKey {
    /// Create a view key from a raw source path
    pub fn new(raw: impl AsRef<str>) -> Self {
        let mut path = raw.as_ref().trim().replace('\\', "/");
        loop {
            if let Some(rest) = path.strip_prefix("./") {
                path = rest.to_string();
            } else if let Some(rest) = path.strip_prefix('/') {
                path = rest.to_string();
            } else {
                break;
            }
        }
        Self(path)
    }

    /// The normalized path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All non-empty path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Directory segments (every segment except the file name)
    pub fn directory_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.segments().collect();
        segments.pop();
        segments
    }

    /// The last path segment
    pub fn file_name(&self) -> &str {
        self.segments().last().unwrap_or_default()
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewKey {
    fn from(raw: &str) -> Self {
        ViewKey::new(raw)
    }
}

impl From<String> for ViewKey {
    fn from(raw: String) -> Self {
        ViewKey::new(raw)
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the CLI subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Everything, including per-sample tracing
    Trace,
    /// Per-view progress
    Debug,
    /// Run summaries
    #[default]
    Info,
    /// Loosely typed fields and fallbacks
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_key_normalization() {
        assert_eq!(ViewKey::new("/a/b/card.hbs"), ViewKey::new("a/b/card.hbs"));
        assert_eq!(ViewKey::new("./a/card.hbs").as_str(), "a/card.hbs");
        assert_eq!(ViewKey::new("a\\b\\card.hbs").as_str(), "a/b/card.hbs");
        assert_eq!(ViewKey::new("//card.hbs").as_str(), "card.hbs");
    }

    #[test]
    fn test_view_key_segments() {
        let key = ViewKey::new("/a/b/card.hbs");
        assert_eq!(key.directory_segments(), vec!["a", "b"]);
        assert_eq!(key.file_name(), "card.hbs");

        let key = ViewKey::new("card.hbs");
        assert!(key.directory_segments().is_empty());
        assert_eq!(key.file_name(), "card.hbs");
    }

    #[test]
    fn test_view_key_deserialization_normalizes() {
        let key: ViewKey = serde_json::from_str(r#""/a\\b/card.hbs""#).unwrap();
        assert_eq!(key, ViewKey::new("a/b/card.hbs"));
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""a/b/card.hbs""#);

        let keys: std::collections::BTreeMap<ViewKey, u32> =
            serde_json::from_str(r#"{"./x/card.hbs": 1}"#).unwrap();
        assert_eq!(keys.get(&ViewKey::new("x/card.hbs")), Some(&1));
    }

    #[test]
    fn test_log_level_into_tracing() {
        let level: tracing::Level = LogLevel::Warn.into();
        assert_eq!(level, tracing::Level::WARN);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
