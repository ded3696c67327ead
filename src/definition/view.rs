//! View definitions

use super::field::FieldDefinition;
use crate::error::{DefinitionError, Warning};
use crate::identity::ViewIdentity;
use crate::sample::ViewUsage;
use crate::types::ViewKey;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// The unified schema of one view
#[derive(Debug, Clone, Serialize)]
pub struct ViewDefinition {
    identity: ViewIdentity,

    fields: BTreeMap<String, FieldDefinition>,

    notes: BTreeSet<String>,

    origins: BTreeSet<String>,

    errors: Vec<DefinitionError>,

    warnings: Vec<Warning>,

    #[serde(skip)]
    validated: bool,
}

impl ViewDefinition {
    /// Create an unvalidated definition
    pub fn new(
        identity: ViewIdentity,
        fields: impl IntoIterator<Item = FieldDefinition>,
        usage: Option<&ViewUsage>,
    ) -> Self {
        Self {
            identity,
            fields: fields
                .into_iter()
                .map(|field| (field.name().to_string(), field))
                .collect(),
            notes: usage.map(|u| u.notes.clone()).unwrap_or_default(),
            origins: usage.map(|u| u.origins.clone()).unwrap_or_default(),
            errors: Vec::new(),
            warnings: Vec::new(),
            validated: false,
        }
    }

    /// Validate the identity, then every field, collecting all errors.
    ///
    /// Running it again is a no-op.
    pub fn validate(&mut self) {
        if self.validated {
            return;
        }

        for error in self.identity.validate() {
            self.push_error(error);
        }

        let field_errors: Vec<DefinitionError> = self
            .fields
            .values()
            .flat_map(|field| field.errors().iter().cloned())
            .collect();
        for error in field_errors {
            self.push_error(error);
        }

        let field_warnings: Vec<Warning> = self
            .fields
            .values()
            .flat_map(|field| field.warnings().iter().cloned())
            .collect();
        for warning in field_warnings {
            if !self.warnings.contains(&warning) {
                self.warnings.push(warning);
            }
        }

        self.validated = true;
    }

    /// Append an error unless an equal one is already recorded
    pub(crate) fn push_error(&mut self, error: DefinitionError) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    /// Resolved identity
    pub fn identity(&self) -> &ViewIdentity {
        &self.identity
    }

    /// Source path key
    pub fn key(&self) -> &ViewKey {
        &self.identity.key
    }

    /// Fully qualified class name
    pub fn fully_qualified_name(&self) -> String {
        self.identity.fully_qualified_name()
    }

    /// All fields ordered by name, including those without an effective type
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    /// Fields that have an effective type
    pub fn typed_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .values()
            .filter(|field| field.effective_type().is_some())
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// View-level documentation notes
    pub fn notes(&self) -> &BTreeSet<String> {
        &self.notes
    }

    /// Files the view was instantiated in
    pub fn origins(&self) -> &BTreeSet<String> {
        &self.origins
    }

    /// Accumulated errors: identity, fields, then corpus-level
    pub fn errors(&self) -> &[DefinitionError] {
        &self.errors
    }

    /// Accumulated warnings from every field
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether `validate` has run
    pub fn is_validated(&self) -> bool {
        self.validated
    }
}
