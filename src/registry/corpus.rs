//! Corpus registry
//!
//! The single owner of every view definition of one generation run. Views
//! are indexed by key and reference each other by key, so reference cycles
//! need no cyclic ownership.

use super::report::ValidationReport;
use super::validate::validate_corpus;
use crate::config::GeneratorConfig;
use crate::definition::{FieldDefinition, ViewDefinition, ViewDefinitionBuilder};
use crate::error::{DefinitionError, Error, Result, Warning};
use crate::identity::{NamespaceResolver, ViewIdentity};
use crate::imports::{ImportSet, ReferencePlan, TypeReference};
use crate::sample::Corpus;
use crate::schema::EffectiveType;
use crate::types::ViewKey;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// All view definitions of one generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusRegistry {
    views: BTreeMap<ViewKey, ViewDefinition>,

    #[serde(skip)]
    implicit_namespaces: BTreeSet<String>,
}

impl CorpusRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the whole pipeline over a corpus: resolve identities, build and
    /// validate every view, then validate the corpus as a whole
    pub fn build(corpus: &Corpus, config: &GeneratorConfig) -> Self {
        let builder = ViewDefinitionBuilder::new(config);
        let keys = builder.view_keys(corpus);
        let resolver = NamespaceResolver::new(&keys, config);

        debug!(
            "Resolved {} view(s), eliding common prefix [{}]",
            keys.len(),
            resolver.common_prefix().join("/")
        );

        let mut registry = Self {
            views: BTreeMap::new(),
            implicit_namespaces: config.implicit_namespaces.clone(),
        };

        for definition in builder.build(corpus, &resolver) {
            registry.register(definition);
        }

        validate_corpus(&mut registry);

        info!(
            "Built {} view definition(s) with {} error(s) and {} warning(s)",
            registry.len(),
            registry.error_count(),
            registry.warnings().count()
        );

        registry
    }

    /// Add a definition, replacing any previous one with the same key
    pub fn register(&mut self, definition: ViewDefinition) {
        self.views.insert(definition.key().clone(), definition);
    }

    /// Look up a definition by key
    pub fn get(&self, key: &ViewKey) -> Option<&ViewDefinition> {
        self.views.get(key)
    }

    /// Look up a definition by raw source path
    pub fn get_by_path(&self, path: &str) -> Option<&ViewDefinition> {
        self.get(&ViewKey::new(path))
    }

    pub(crate) fn views_mut(&mut self) -> impl Iterator<Item = &mut ViewDefinition> {
        self.views.values_mut()
    }

    /// All definitions ordered by key
    pub fn iter(&self) -> impl Iterator<Item = &ViewDefinition> {
        self.views.values()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the registry holds no definitions
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Identity a view key resolves to
    pub fn resolve(&self, key: &ViewKey) -> Option<&ViewIdentity> {
        self.get(key).map(ViewDefinition::identity)
    }

    /// Every accumulated error, view by view
    pub fn errors(&self) -> impl Iterator<Item = &DefinitionError> {
        self.views.values().flat_map(|view| view.errors().iter())
    }

    /// Every accumulated warning, view by view
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.views.values().flat_map(|view| view.warnings().iter())
    }

    /// Total number of errors
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Check if any view has an error
    pub fn has_errors(&self) -> bool {
        self.views.values().any(ViewDefinition::has_errors)
    }

    /// Full diagnostic report
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            views: self.len(),
            fields: self.views.values().map(ViewDefinition::field_count).sum(),
            errors: self.errors().cloned().collect(),
            warnings: self.warnings().cloned().collect(),
        }
    }

    /// Hand the registry over for rendering, or fail if any error accumulated
    pub fn into_validated(self) -> Result<Self> {
        if self.has_errors() {
            return Err(Error::Validation {
                error_count: self.error_count(),
                view_count: self.views.values().filter(|v| v.has_errors()).count(),
            });
        }
        Ok(self)
    }

    /// The type reference a view key stands for
    fn type_reference(&self, key: &ViewKey) -> TypeReference {
        match self.resolve(key) {
            Some(identity) => TypeReference::from_identity(identity),
            None => TypeReference::parse(key.as_str()),
        }
    }

    /// Sorted fully qualified names of the leaf types a field accepts
    pub fn value_types(&self, field: &FieldDefinition) -> Vec<String> {
        let Some(effective_type) = field.effective_type() else {
            return Vec::new();
        };

        let names: BTreeSet<String> = match effective_type.leaf() {
            EffectiveType::ObjectReference(views) => views
                .iter()
                .map(|key| self.type_reference(key).fully_qualified_name())
                .collect(),
            leaf => BTreeSet::from([leaf.to_string()]),
        };
        names.into_iter().collect()
    }

    /// Import decisions for the unit emitted from one view.
    ///
    /// References that would shadow an already imported local name are
    /// listed as fully qualified instead.
    pub fn references_for(&self, key: &ViewKey) -> Option<ReferencePlan> {
        let view = self.get(key)?;

        let mut imports = ImportSet::for_view(view.identity())
            .with_implicit_namespaces(self.implicit_namespaces.iter().cloned());
        let mut qualified = BTreeSet::new();

        for field in view.typed_fields() {
            let Some(effective_type) = field.effective_type() else {
                continue;
            };

            for target in effective_type.references() {
                let reference = self.type_reference(target);
                if let Err(err) = imports.add(reference.clone()) {
                    debug_assert!(err.is_import_conflict());
                    debug!("{}: {}", view.key(), err);
                    qualified.insert(reference.fully_qualified_name());
                }
            }
        }

        Some(ReferencePlan {
            imports: imports.imports(),
            qualified: qualified.into_iter().collect(),
        })
    }

    /// Import decisions for every view, ordered by key
    pub fn reference_plans(&self) -> BTreeMap<&ViewKey, ReferencePlan> {
        self.views
            .keys()
            .filter_map(|key| self.references_for(key).map(|plan| (key, plan)))
            .collect()
    }
}
