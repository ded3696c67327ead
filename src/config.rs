//! Generator configuration
//!
//! Settings for one generation run: the namespace and local-name decoration
//! applied by the namespace resolver, the strictness of type unification,
//! and the conventions the classifier uses to tell key/value bags apart from
//! view instances. Loaded from YAML or JSON, then overridden by CLI flags.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Dotted identifier accepted as a namespace prefix
static NAMESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z_a-z0-9]+\.)*[A-Z_a-z0-9]+$").expect("namespace pattern is valid")
});

// ============================================================================
// Conflict Policy
// ============================================================================

/// What to do with a field whose observed kinds cannot be unified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Record a `ConflictingTypes` error
    #[default]
    Error,
    /// Degrade to an opaque type and record a warning (non-strict mode only)
    Opaque,
}

// ============================================================================
// Generator Config
// ============================================================================

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Namespace every view namespace is rooted under (e.g. `com.example.views`)
    pub namespace_prefix: String,

    /// Prepended to every local class name
    pub name_prefix: Option<String>,

    /// Appended to every local class name
    pub name_suffix: String,

    /// Refuse the `{ObjectReference, String}` loosening
    pub strict: bool,

    /// Handling of unresolvable kind conflicts
    pub conflict_policy: ConflictPolicy,

    /// View paths whose instances are key/value bags, not views
    pub map_templates: BTreeSet<String>,

    /// Field names whose object values are always key/value bags
    pub map_keys: BTreeSet<String>,

    /// Namespaces that never need an import
    pub implicit_namespaces: BTreeSet<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: String::new(),
            name_prefix: None,
            name_suffix: default_name_suffix(),
            strict: false,
            conflict_policy: ConflictPolicy::default(),
            map_templates: BTreeSet::new(),
            map_keys: default_map_keys(),
            implicit_namespaces: BTreeSet::new(),
        }
    }
}

fn default_name_suffix() -> String {
    "View".to_string()
}

fn default_map_keys() -> BTreeSet<String> {
    ["displayOptions", "extraAttributes", "jsonObject"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl GeneratorConfig {
    /// Create a config with the given namespace prefix and defaults elsewhere
    pub fn new(namespace_prefix: impl Into<String>) -> Self {
        Self {
            namespace_prefix: namespace_prefix.into(),
            ..Self::default()
        }
    }

    /// Load and validate a config file (YAML, or JSON for `.json` files)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let config: Self = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the namespace prefix
    #[must_use]
    pub fn with_namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.namespace_prefix = prefix.into();
        self
    }

    /// Set the local name prefix
    #[must_use]
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    /// Set the local name suffix
    #[must_use]
    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = suffix.into();
        self
    }

    /// Enable/disable strict typing
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the conflict policy
    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Add a view path whose instances are classified as maps
    #[must_use]
    pub fn with_map_template(mut self, template: impl AsRef<str>) -> Self {
        self.map_templates
            .insert(crate::types::ViewKey::new(template).as_str().to_string());
        self
    }

    /// Add a namespace that never needs an import
    #[must_use]
    pub fn with_implicit_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.implicit_namespaces.insert(namespace.into());
        self
    }

    /// Whether the given view path is configured as a map template
    pub fn is_map_template(&self, key: &crate::types::ViewKey) -> bool {
        self.map_templates
            .iter()
            .any(|t| crate::types::ViewKey::new(t) == *key)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.namespace_prefix.is_empty() && !NAMESPACE_PATTERN.is_match(&self.namespace_prefix)
        {
            return Err(Error::invalid_value(
                "namespace_prefix",
                format!(
                    "[{}] must be a valid dotted namespace",
                    self.namespace_prefix
                ),
            ));
        }

        if let Some(prefix) = &self.name_prefix {
            if prefix.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
                return Err(Error::invalid_value(
                    "name_prefix",
                    format!("[{prefix}] may only contain letters, digits and underscores"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.name_suffix, "View");
        assert!(!config.strict);
        assert_eq!(config.conflict_policy, ConflictPolicy::Error);
        assert!(config.map_keys.contains("displayOptions"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
namespace_prefix: com.example.views
name_prefix: Sg
strict: true
conflict_policy: opaque
map_templates:
  - /components/Attributes.hbs
";
        let config = GeneratorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.namespace_prefix, "com.example.views");
        assert_eq!(config.name_prefix.as_deref(), Some("Sg"));
        assert!(config.strict);
        assert_eq!(config.conflict_policy, ConflictPolicy::Opaque);
        assert!(config.is_map_template(&"components/Attributes.hbs".into()));
        // unspecified fields keep their defaults
        assert_eq!(config.name_suffix, "View");
    }

    #[test]
    fn test_invalid_namespace_prefix() {
        let err = GeneratorConfig::new("com.example-views").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "namespace_prefix"));

        let err = GeneratorConfig::new("com..views").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_invalid_name_prefix() {
        let config = GeneratorConfig::new("com.example").with_name_prefix("My-");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"namespace_prefix": "com.example", "strict": true}}"#).unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.namespace_prefix, "com.example");
        assert!(config.strict);
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::from_file("/does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
