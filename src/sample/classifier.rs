//! Value-kind classification of parsed JSON values

use super::types::ValueKind;
use crate::config::GeneratorConfig;
use crate::types::{JsonObject, JsonValue, ViewKey};
use std::collections::BTreeSet;

/// Keys marking an object as a view instance, in order of precedence
const VIEW_MARKERS: [&str; 2] = ["_template", "_view"];

/// Whether a key holds metadata rather than a field value
pub(crate) fn is_meta_key(key: &str) -> bool {
    key.starts_with('_')
}

/// The raw view key an object declares, if any
pub fn view_marker(object: &JsonObject) -> Option<ViewKey> {
    VIEW_MARKERS
        .iter()
        .filter_map(|marker| object.get(*marker).and_then(JsonValue::as_str))
        .map(str::trim)
        .find(|path| !path.is_empty())
        .map(ViewKey::new)
}

/// Classifies JSON values into [`ValueKind`]s.
///
/// Classification never fails. `null` is not a kind, so it yields `None`
/// and is treated by callers as "not observed".
#[derive(Debug, Clone, Copy)]
pub struct KindClassifier<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> KindClassifier<'a> {
    /// Create a classifier following the conventions of `config`
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// The view an object instantiates, or `None` for a key/value bag
    pub fn instance_key(&self, object: &JsonObject) -> Option<ViewKey> {
        view_marker(object).filter(|key| !self.config.is_map_template(key))
    }

    /// Whether object values of this field are always key/value bags
    pub fn is_map_field(&self, field_name: &str) -> bool {
        self.config.map_keys.contains(field_name)
    }

    /// Classify the value bound to a named field
    pub fn classify_field(&self, field_name: &str, value: &JsonValue) -> Option<ValueKind> {
        match value {
            JsonValue::Object(object) if self.is_map_field(field_name) => {
                Some(ValueKind::Map(self.classify_entries(object)))
            }
            other => self.classify(other),
        }
    }

    /// Classify one value
    pub fn classify(&self, value: &JsonValue) -> Option<ValueKind> {
        match value {
            JsonValue::Null => None,
            JsonValue::Bool(_) => Some(ValueKind::Boolean),
            JsonValue::Number(_) => Some(ValueKind::Number),
            JsonValue::String(_) => Some(ValueKind::String),
            JsonValue::Array(items) => Some(ValueKind::List(
                items.iter().filter_map(|item| self.classify(item)).collect(),
            )),
            JsonValue::Object(object) => Some(match self.instance_key(object) {
                Some(key) => ValueKind::ObjectReference(key),
                None => ValueKind::Map(self.classify_entries(object)),
            }),
        }
    }

    /// Union of the kinds of an object's non-metadata values
    fn classify_entries(&self, object: &JsonObject) -> BTreeSet<ValueKind> {
        object
            .iter()
            .filter(|(key, _)| !is_meta_key(key))
            .filter_map(|(key, value)| self.classify_field(key, value))
            .collect()
    }
}
