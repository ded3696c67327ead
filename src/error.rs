//! Error types for viewgen
//!
//! Two kinds of failure live here. [`Error`] is returned through `Result` for
//! conditions that stop an operation (bad configuration, unreadable corpus,
//! an import conflict while emitting one unit). [`DefinitionError`] and
//! [`Warning`] are collected diagnostics: they are recorded against the
//! owning field or view definition and never abort sibling validation.

use serde::Serialize;
use thiserror::Error;

/// The main error type for viewgen
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Configuration could not be used
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// One configuration value is out of range or malformed
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Configuration key
        field: String,
        /// What is wrong with the value
        message: String,
    },

    /// A YAML configuration file did not parse
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A JSON document did not parse
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Emission Errors
    // ============================================================================
    /// Two references share a local name within one emitted unit
    #[error(
        "Import conflict on '{local_name}': '{rejected}' would shadow already imported '{existing}'"
    )]
    ImportConflict {
        /// The shared unqualified name
        local_name: String,
        /// Fully qualified name imported first
        existing: String,
        /// Fully qualified name that was refused
        rejected: String,
    },

    /// The registry still holds errors when handed over for rendering
    #[error("Validation failed with {error_count} error(s) across {view_count} view(s)")]
    Validation {
        /// Number of accumulated errors
        error_count: usize,
        /// Number of views with at least one error
        view_count: usize,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or corpus file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// The missing path
        path: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Anything else, usually with added context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an import conflict error
    pub fn import_conflict(
        local_name: impl Into<String>,
        existing: impl Into<String>,
        rejected: impl Into<String>,
    ) -> Self {
        Self::ImportConflict {
            local_name: local_name.into(),
            existing: existing.into(),
            rejected: rejected.into(),
        }
    }

    /// Check if this error is an import conflict the renderer can recover from
    /// by fully qualifying the reference
    pub fn is_import_conflict(&self) -> bool {
        matches!(self, Error::ImportConflict { .. })
    }
}

/// Result type alias for viewgen
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

// ============================================================================
// Collected diagnostics
// ============================================================================

/// An error recorded against a field or view definition.
///
/// Ordering and equality are structural so that error lists can be
/// de-duplicated and compared across runs.
#[derive(Error, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefinitionError {
    /// A field was seen but no value ever gave it an inferable type
    #[error("({view} - {field}) field must have at least one observed value")]
    NoValue {
        /// Owning view key
        view: String,
        /// Field name
        field: String,
    },

    /// A field's observed kinds cannot be unified
    #[error("({view} - {field}) field has conflicting value types [{}]", .kinds.join(", "))]
    ConflictingTypes {
        /// Owning view key
        view: String,
        /// Field name
        field: String,
        /// Sorted kind names that clashed
        kinds: Vec<String>,
    },

    /// A view resolves to a namespace or class name outside the identifier grammar
    #[error("({view}) resolves to invalid class identity [{identity}]: {reason}")]
    InvalidIdentity {
        /// View key
        view: String,
        /// Fully qualified name it resolved to
        identity: String,
        /// Which part is invalid
        reason: String,
    },

    /// Several views resolve to the same fully qualified class name
    #[error(
        "({view}) resolves to a conflicting class name [{class_name}] shared with: [{}]",
        .others.join(", ")
    )]
    NameCollision {
        /// View key this error is recorded against
        view: String,
        /// The shared fully qualified name
        class_name: String,
        /// Keys of the other views in the group, sorted
        others: Vec<String>,
    },
}

impl DefinitionError {
    /// The view this error was recorded against
    pub fn view(&self) -> &str {
        match self {
            DefinitionError::NoValue { view, .. }
            | DefinitionError::ConflictingTypes { view, .. }
            | DefinitionError::InvalidIdentity { view, .. }
            | DefinitionError::NameCollision { view, .. } => view,
        }
    }

    /// The field this error was recorded against, if it is field-level
    pub fn field(&self) -> Option<&str> {
        match self {
            DefinitionError::NoValue { field, .. }
            | DefinitionError::ConflictingTypes { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A non-fatal observation recorded while unifying a field.
#[derive(Error, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A field accepts both a view reference and a plain string
    #[error(
        "({view} - {field}) has multiple value types [{}], but this is a common use case so it is allowed",
        .kinds.join(", ")
    )]
    LooselyTyped {
        /// Owning view key
        view: String,
        /// Field name
        field: String,
        /// Sorted kind names that were accepted together
        kinds: Vec<String>,
    },

    /// A conflicting field was given an opaque type instead of an error
    #[error(
        "({view} - {field}) has conflicting value types [{}], falling back to an opaque type",
        .kinds.join(", ")
    )]
    ConflictFallback {
        /// Owning view key
        view: String,
        /// Field name
        field: String,
        /// Sorted kind names that clashed
        kinds: Vec<String>,
    },
}
