//! View definition builder
//!
//! Groups samples by view, builds one field definition per distinct field
//! name and validates each resulting view definition.

use super::field::FieldDefinition;
use super::view::ViewDefinition;
use crate::config::GeneratorConfig;
use crate::identity::NamespaceResolver;
use crate::sample::{Corpus, Sample};
use crate::schema::UnifyOptions;
use crate::types::ViewKey;
use std::collections::BTreeMap;
use tracing::debug;

/// Samples of one view, grouped by field name
type FieldSamples = BTreeMap<String, Vec<Sample>>;

/// Builds validated [`ViewDefinition`]s from a corpus
#[derive(Debug, Clone)]
pub struct ViewDefinitionBuilder<'a> {
    config: &'a GeneratorConfig,
    options: UnifyOptions,
}

impl<'a> ViewDefinitionBuilder<'a> {
    /// Create a builder for the given configuration
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            options: UnifyOptions::from(config),
        }
    }

    /// Every view key of the corpus that gets a definition.
    ///
    /// Views only ever referenced, never sampled, are included and end up
    /// with an empty definition.
    pub fn view_keys(&self, corpus: &Corpus) -> Vec<ViewKey> {
        let referenced = corpus.samples().iter().flat_map(|s| s.kind.references());

        let mut keys: Vec<ViewKey> = corpus
            .views()
            .keys()
            .chain(corpus.samples().iter().map(|s| &s.view))
            .chain(referenced)
            .filter(|key| !self.config.is_map_template(key))
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Build and validate one definition per view, ordered by view key
    pub fn build(&self, corpus: &Corpus, resolver: &NamespaceResolver) -> Vec<ViewDefinition> {
        let mut grouped: BTreeMap<ViewKey, FieldSamples> = self
            .view_keys(corpus)
            .into_iter()
            .map(|key| (key, FieldSamples::new()))
            .collect();

        for sample in corpus.samples() {
            if let Some(fields) = grouped.get_mut(&sample.view) {
                fields
                    .entry(sample.field_name.clone())
                    .or_default()
                    .push(sample.clone());
            }
        }

        grouped
            .into_iter()
            .map(|(key, fields)| self.build_view(&key, fields, corpus, resolver))
            .collect()
    }

    fn build_view(
        &self,
        key: &ViewKey,
        fields: FieldSamples,
        corpus: &Corpus,
        resolver: &NamespaceResolver,
    ) -> ViewDefinition {
        debug!("Building view {} with {} field(s)", key, fields.len());

        let identity = resolver.resolve(key);
        let fields = fields.into_iter().filter_map(|(name, samples)| {
            FieldDefinition::from_samples(key, name, samples, self.options)
        });

        let mut definition = ViewDefinition::new(identity, fields, corpus.usage(key));
        definition.validate();
        definition
    }
}
