//! Type reference types

use crate::identity::{qualify, ViewIdentity};
use serde::Serialize;
use std::fmt;

/// An external type referenced while emitting one unit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypeReference {
    /// Dotted namespace, empty for built-ins and the root namespace
    pub namespace: String,

    /// Unqualified name
    pub local_name: String,

    /// Built-in type of the target language, never imported
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub builtin: bool,
}

impl TypeReference {
    /// Create a reference from its parts
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
            builtin: false,
        }
    }

    /// A built-in type of the target language (no namespace)
    pub fn builtin(local_name: impl Into<String>) -> Self {
        Self {
            builtin: true,
            ..Self::new(String::new(), local_name)
        }
    }

    /// Split a fully qualified name at its last `.`; an unqualified name is
    /// taken as a built-in
    pub fn parse(fully_qualified_name: &str) -> Self {
        match fully_qualified_name.rsplit_once('.') {
            Some((namespace, local_name)) => Self::new(namespace, local_name),
            None => Self::builtin(fully_qualified_name),
        }
    }

    /// The class a view resolves to
    pub fn from_identity(identity: &ViewIdentity) -> Self {
        Self::new(identity.namespace.clone(), identity.local_name.clone())
    }

    /// `namespace.local_name`
    pub fn fully_qualified_name(&self) -> String {
        qualify(&self.namespace, &self.local_name)
    }

    /// Whether this is a built-in type
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

/// Outcome of resolving every reference of one view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferencePlan {
    /// References to import, sorted by fully qualified name
    pub imports: Vec<String>,

    /// References that must be written fully qualified, sorted
    pub qualified: Vec<String>,
}
