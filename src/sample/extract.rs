//! Sample extraction from parsed JSON documents
//!
//! Walks a document, finds every view instance (an object carrying a
//! `_template` or `_view` key) at any depth and turns each of its fields
//! into a [`Sample`].

use super::classifier::{is_meta_key, KindClassifier};
use super::types::{Corpus, Sample};
use crate::config::GeneratorConfig;
use crate::types::{JsonObject, JsonValue, ViewKey};
use tracing::trace;

/// View-level documentation key
const NOTE_KEY: &str = "_note";

/// Per-field documentation key (object of field name to note)
const FIELD_NOTES_KEY: &str = "_fieldNotes";

/// Extracts samples from documents into a [`Corpus`]
#[derive(Debug, Clone, Copy)]
pub struct SampleExtractor<'a> {
    classifier: KindClassifier<'a>,
}

impl<'a> SampleExtractor<'a> {
    /// Create an extractor following the conventions of `config`
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            classifier: KindClassifier::new(config),
        }
    }

    /// Extract every sample of `document` into `corpus`
    pub fn extract(&self, document: &JsonValue, origin: &str, corpus: &mut Corpus) {
        self.walk(document, origin, corpus);
    }

    fn walk(&self, value: &JsonValue, origin: &str, corpus: &mut Corpus) {
        match value {
            JsonValue::Object(object) => {
                if let Some(view) = self.classifier.instance_key(object) {
                    self.extract_instance(view, object, origin, corpus);
                } else {
                    self.walk_entries(object, origin, corpus);
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    self.walk(item, origin, corpus);
                }
            }
            _ => {}
        }
    }

    fn walk_entries(&self, object: &JsonObject, origin: &str, corpus: &mut Corpus) {
        for (key, child) in object {
            if !is_meta_key(key) {
                self.walk(child, origin, corpus);
            }
        }
    }

    fn extract_instance(
        &self,
        view: ViewKey,
        object: &JsonObject,
        origin: &str,
        corpus: &mut Corpus,
    ) {
        trace!("Extracting instance of {} from {}", view, origin);

        let note = object.get(NOTE_KEY).and_then(JsonValue::as_str);
        corpus.record_view(view.clone(), origin, note);

        let field_notes = object.get(FIELD_NOTES_KEY).and_then(JsonValue::as_object);

        for (name, value) in object {
            if is_meta_key(name) {
                continue;
            }

            if let Some(kind) = self.classifier.classify_field(name, value) {
                let mut sample = Sample::new(view.clone(), name.clone(), kind)
                    .with_payload(value.clone())
                    .with_origin(origin);

                if let Some(note) = field_notes
                    .and_then(|notes| notes.get(name))
                    .and_then(JsonValue::as_str)
                {
                    sample = sample.with_note(note);
                }

                corpus.push(sample);
            }

            match value {
                JsonValue::Object(bag) if self.classifier.is_map_field(name) => {
                    self.walk_entries(bag, origin, corpus);
                }
                _ => self.walk(value, origin, corpus),
            }
        }
    }
}

/// Extract the samples of a single document (convenience function)
pub fn extract_samples(document: &JsonValue, origin: &str, config: &GeneratorConfig) -> Corpus {
    let mut corpus = Corpus::new();
    SampleExtractor::new(config).extract(document, origin, &mut corpus);
    corpus
}
