//! View identity types

use crate::error::DefinitionError;
use crate::types::ViewKey;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// One namespace segment or local name
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Canonical identity of a view: its source path and the class it resolves to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ViewIdentity {
    /// Normalized source path
    pub key: ViewKey,

    /// Dotted namespace, empty for the root namespace
    pub namespace: String,

    /// Unqualified class name
    pub local_name: String,
}

impl ViewIdentity {
    /// Create an identity from its parts
    pub fn new(
        key: impl Into<ViewKey>,
        namespace: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// `namespace.local_name`, or just the local name in the root namespace
    pub fn fully_qualified_name(&self) -> String {
        qualify(&self.namespace, &self.local_name)
    }

    /// Check the resolved namespace and local name against the identifier grammar
    pub fn validate(&self) -> Vec<DefinitionError> {
        let mut errors = Vec::new();

        if let Some(segment) = self
            .namespace
            .split('.')
            .filter(|_| !self.namespace.is_empty())
            .find(|segment| !IDENTIFIER.is_match(segment))
        {
            errors.push(self.invalid(format!(
                "namespace segment [{segment}] is not a valid identifier"
            )));
        }

        if !IDENTIFIER.is_match(&self.local_name) {
            errors.push(self.invalid(format!(
                "local name [{}] is not a valid identifier",
                self.local_name
            )));
        }

        errors
    }

    fn invalid(&self, reason: String) -> DefinitionError {
        DefinitionError::InvalidIdentity {
            view: self.key.to_string(),
            identity: self.fully_qualified_name(),
            reason,
        }
    }
}

impl fmt::Display for ViewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fully_qualified_name(), self.key)
    }
}

/// Join a namespace and a local name
pub(crate) fn qualify(namespace: &str, local_name: &str) -> String {
    if namespace.is_empty() {
        local_name.to_string()
    } else {
        format!("{namespace}.{local_name}")
    }
}
