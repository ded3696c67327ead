//! Sample types

use crate::types::{JsonValue, ViewKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ============================================================================
// Value Kind
// ============================================================================

/// Kind of one observed JSON value.
///
/// Container kinds carry the set of kinds observed among their elements;
/// an empty set means every observed container was empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ValueKind {
    /// `true` or `false`
    Boolean,
    /// Any JSON string
    String,
    /// Any JSON number
    Number,
    /// Array, with the kinds of its non-null elements
    List(BTreeSet<ValueKind>),
    /// Unmarked object or map field, with the kinds of its values
    Map(BTreeSet<ValueKind>),
    /// Instance of another view
    ObjectReference(ViewKey),
}

/// Category of a [`ValueKind`], ignoring item kinds and reference targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KindCategory {
    /// See [`ValueKind::Boolean`]
    Boolean,
    /// See [`ValueKind::String`]
    String,
    /// See [`ValueKind::Number`]
    Number,
    /// See [`ValueKind::List`]
    List,
    /// See [`ValueKind::Map`]
    Map,
    /// See [`ValueKind::ObjectReference`]
    ObjectReference,
}

impl ValueKind {
    /// The category of this kind
    pub fn category(&self) -> KindCategory {
        match self {
            ValueKind::Boolean => KindCategory::Boolean,
            ValueKind::String => KindCategory::String,
            ValueKind::Number => KindCategory::Number,
            ValueKind::List(_) => KindCategory::List,
            ValueKind::Map(_) => KindCategory::Map,
            ValueKind::ObjectReference(_) => KindCategory::ObjectReference,
        }
    }

    /// Create a list kind from its item kinds
    pub fn list(items: impl IntoIterator<Item = ValueKind>) -> Self {
        ValueKind::List(items.into_iter().collect())
    }

    /// Create a map kind from its item kinds
    pub fn map(items: impl IntoIterator<Item = ValueKind>) -> Self {
        ValueKind::Map(items.into_iter().collect())
    }

    /// Create a reference to the view at the given path
    pub fn reference(view: impl AsRef<str>) -> Self {
        ValueKind::ObjectReference(ViewKey::new(view))
    }

    /// Every view referenced at any depth, ordered by key
    pub fn references(&self) -> BTreeSet<&ViewKey> {
        match self {
            ValueKind::ObjectReference(view) => BTreeSet::from([view]),
            ValueKind::List(items) | ValueKind::Map(items) => {
                items.iter().flat_map(ValueKind::references).collect()
            }
            _ => BTreeSet::new(),
        }
    }
}

impl fmt::Display for KindCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindCategory::Boolean => write!(f, "Boolean"),
            KindCategory::String => write!(f, "String"),
            KindCategory::Number => write!(f, "Number"),
            KindCategory::List => write!(f, "List"),
            KindCategory::Map => write!(f, "Map"),
            KindCategory::ObjectReference => write!(f, "ObjectReference"),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::List(items) => write!(f, "List<{}>", join_sorted(items)),
            ValueKind::Map(items) => write!(f, "Map<{}>", join_sorted(items)),
            ValueKind::ObjectReference(view) => write!(f, "ObjectReference({view})"),
            other => write!(f, "{}", other.category()),
        }
    }
}

/// Join kinds by their canonical names, sorted
pub(crate) fn join_sorted<'a>(kinds: impl IntoIterator<Item = &'a ValueKind>) -> String {
    sorted_names(kinds).join(" | ")
}

/// Canonical names of the given kinds, sorted and de-duplicated
pub fn sorted_names<'a>(kinds: impl IntoIterator<Item = &'a ValueKind>) -> Vec<String> {
    let names: BTreeSet<String> = kinds.into_iter().map(ToString::to_string).collect();
    names.into_iter().collect()
}

// ============================================================================
// Sample
// ============================================================================

/// One observed JSON value bound to a field of a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// View that instantiated the value
    pub view: ViewKey,

    /// Field the value was bound to
    pub field_name: String,

    /// Classified kind of the value
    pub kind: ValueKind,

    /// The value itself, untouched
    pub raw_payload: JsonValue,

    /// Source file the value was read from
    pub origin: String,

    /// Documentation attached at this use site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Sample {
    /// Create a sample with an empty payload and origin
    pub fn new(view: impl Into<ViewKey>, field_name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            view: view.into(),
            field_name: field_name.into(),
            kind,
            raw_payload: JsonValue::Null,
            origin: String::new(),
            note: None,
        }
    }

    /// Set the raw payload
    #[must_use]
    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.raw_payload = payload;
        self
    }

    /// Set the origin
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Set the use-site note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

// ============================================================================
// Corpus
// ============================================================================

/// Everything recorded about one view's instances, apart from its fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewUsage {
    /// Files the view was instantiated in
    pub origins: BTreeSet<String>,

    /// View-level documentation notes
    pub notes: BTreeSet<String>,
}

/// Immutable snapshot of every sample of one generation run
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    samples: Vec<Sample>,
    views: BTreeMap<ViewKey, ViewUsage>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from samples alone
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut corpus = Self::new();
        for sample in samples {
            corpus.push(sample);
        }
        corpus
    }

    /// Add a sample, recording its view as instantiated
    pub fn push(&mut self, sample: Sample) {
        let usage = self.views.entry(sample.view.clone()).or_default();
        if !sample.origin.is_empty() {
            usage.origins.insert(sample.origin.clone());
        }
        self.samples.push(sample);
    }

    /// Record a view instance, with or without fields
    pub fn record_view(&mut self, view: ViewKey, origin: &str, note: Option<&str>) {
        let usage = self.views.entry(view).or_default();
        if !origin.is_empty() {
            usage.origins.insert(origin.to_string());
        }
        if let Some(note) = note {
            usage.notes.insert(note.to_string());
        }
    }

    /// Merge another corpus into this one
    pub fn extend(&mut self, other: Corpus) {
        for (view, usage) in other.views {
            let entry = self.views.entry(view).or_default();
            entry.origins.extend(usage.origins);
            entry.notes.extend(usage.notes);
        }
        self.samples.extend(other.samples);
    }

    /// All samples
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Every instantiated view with its usage record, ordered by key
    pub fn views(&self) -> &BTreeMap<ViewKey, ViewUsage> {
        &self.views
    }

    /// Usage record of one view
    pub fn usage(&self, view: &ViewKey) -> Option<&ViewUsage> {
        self.views.get(view)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the corpus holds no samples and no views
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.views.is_empty()
    }
}
