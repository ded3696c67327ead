//! Schema types

use crate::config::{ConflictPolicy, GeneratorConfig};
use crate::types::ViewKey;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The single type inferred for a field from all of its observed kinds
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum EffectiveType {
    /// Boolean
    Boolean,
    /// String
    String,
    /// Number
    Number,
    /// Homogeneous list of the inner type
    List(Box<EffectiveType>),
    /// String-keyed map of the inner type
    Map(Box<EffectiveType>),
    /// Reference to one or more concrete views (polymorphic when more than one)
    ObjectReference(BTreeSet<ViewKey>),
    /// No usable type; only produced by the opaque conflict policy
    Opaque,
}

impl EffectiveType {
    /// Create a list type
    pub fn list(item: EffectiveType) -> Self {
        EffectiveType::List(Box::new(item))
    }

    /// Create a map type
    pub fn map(item: EffectiveType) -> Self {
        EffectiveType::Map(Box::new(item))
    }

    /// Create a reference type over the given view paths
    pub fn reference<I, S>(views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        EffectiveType::ObjectReference(views.into_iter().map(ViewKey::new).collect())
    }

    /// Item type of a list or map
    pub fn item_type(&self) -> Option<&EffectiveType> {
        match self {
            EffectiveType::List(item) | EffectiveType::Map(item) => Some(item),
            _ => None,
        }
    }

    /// Whether this is a list or map
    pub fn is_collection(&self) -> bool {
        self.item_type().is_some()
    }

    /// Every view referenced at any depth, ordered by key
    pub fn references(&self) -> BTreeSet<&ViewKey> {
        match self {
            EffectiveType::ObjectReference(views) => views.iter().collect(),
            EffectiveType::List(item) | EffectiveType::Map(item) => item.references(),
            _ => BTreeSet::new(),
        }
    }

    /// The innermost non-collection type
    pub fn leaf(&self) -> &EffectiveType {
        match self {
            EffectiveType::List(item) | EffectiveType::Map(item) => item.leaf(),
            other => other,
        }
    }
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectiveType::Boolean => write!(f, "Boolean"),
            EffectiveType::String => write!(f, "String"),
            EffectiveType::Number => write!(f, "Number"),
            EffectiveType::List(item) => write!(f, "List<{item}>"),
            EffectiveType::Map(item) => write!(f, "Map<{item}>"),
            EffectiveType::ObjectReference(views) => {
                let names: Vec<&str> = views.iter().map(ViewKey::as_str).collect();
                write!(f, "ObjectReference({})", names.join(" | "))
            }
            EffectiveType::Opaque => write!(f, "Opaque"),
        }
    }
}

/// A loosening accepted while unifying, reported as a warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loosening {
    /// `{ObjectReference, String}` accepted as a reference
    ReferenceOrString {
        /// Sorted kind names accepted together
        kinds: Vec<String>,
    },
    /// Conflicting kinds degraded to [`EffectiveType::Opaque`]
    OpaqueFallback {
        /// Sorted kind names that clashed
        kinds: Vec<String>,
    },
}

/// Successful unification result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unified {
    /// The inferred type
    pub effective_type: EffectiveType,

    /// Loosenings accepted at any depth
    pub loosenings: Vec<Loosening>,
}

impl Unified {
    pub(crate) fn exact(effective_type: EffectiveType) -> Self {
        Self {
            effective_type,
            loosenings: Vec::new(),
        }
    }

    /// Whether a plain string is also accepted where a reference is expected
    pub fn is_loosely_typed(&self) -> bool {
        self.loosenings
            .iter()
            .any(|l| matches!(l, Loosening::ReferenceOrString { .. }))
    }
}

/// Unification options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnifyOptions {
    /// Refuse the `{ObjectReference, String}` loosening
    pub strict: bool,

    /// Handling of conflicts in non-strict mode
    pub conflict_policy: ConflictPolicy,
}

impl UnifyOptions {
    /// Strict options: no loosening at all
    pub fn strict() -> Self {
        Self {
            strict: true,
            conflict_policy: ConflictPolicy::Error,
        }
    }
}

impl From<&GeneratorConfig> for UnifyOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            strict: config.strict,
            conflict_policy: config.conflict_policy,
        }
    }
}
