//! Field definitions

use crate::error::{DefinitionError, Warning};
use crate::sample::{Sample, ValueKind};
use crate::schema::{unify_kinds, EffectiveType, Loosening, UnifyError, UnifyOptions};
use crate::types::ViewKey;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Every observation of one field of one view, and the type inferred from them
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
    name: String,

    #[serde(skip)]
    samples: Vec<Sample>,

    /// `None` when no consistent type exists; `errors` then explains why
    effective_type: Option<EffectiveType>,

    loosely_typed: bool,

    notes: BTreeSet<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<DefinitionError>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<Warning>,
}

impl FieldDefinition {
    /// Build a field definition and infer its type.
    ///
    /// Returns `None` for an empty sample list: a field exists only because
    /// it was observed.
    pub fn from_samples(
        view: &ViewKey,
        name: impl Into<String>,
        samples: Vec<Sample>,
        options: UnifyOptions,
    ) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let name = name.into();
        let kinds: BTreeSet<ValueKind> = samples.iter().map(|s| s.kind.clone()).collect();
        let notes = samples.iter().filter_map(|s| s.note.clone()).collect();

        let mut field = Self {
            name,
            samples,
            effective_type: None,
            loosely_typed: false,
            notes,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        match unify_kinds(&kinds, options) {
            Ok(unified) => {
                field.loosely_typed = unified.is_loosely_typed();
                for loosening in unified.loosenings {
                    let warning = field.warning(view, loosening);
                    warn!("{}", warning);
                    field.warnings.push(warning);
                }
                field.effective_type = Some(unified.effective_type);
            }
            Err(err) => {
                let error = field.error(view, err);
                field.errors.push(error);
            }
        }

        Some(field)
    }

    fn warning(&self, view: &ViewKey, loosening: Loosening) -> Warning {
        match loosening {
            Loosening::ReferenceOrString { kinds } => Warning::LooselyTyped {
                view: view.to_string(),
                field: self.name.clone(),
                kinds,
            },
            Loosening::OpaqueFallback { kinds } => Warning::ConflictFallback {
                view: view.to_string(),
                field: self.name.clone(),
                kinds,
            },
        }
    }

    fn error(&self, view: &ViewKey, err: UnifyError) -> DefinitionError {
        match err {
            UnifyError::NoValue => DefinitionError::NoValue {
                view: view.to_string(),
                field: self.name.clone(),
            },
            UnifyError::ConflictingTypes { kinds } => DefinitionError::ConflictingTypes {
                view: view.to_string(),
                field: self.name.clone(),
                kinds,
            },
        }
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every sample of this field (never empty)
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Distinct kinds observed across all samples
    pub fn observed_kinds(&self) -> BTreeSet<&ValueKind> {
        self.samples.iter().map(|s| &s.kind).collect()
    }

    /// Inferred type, or `None` when inference failed
    pub fn effective_type(&self) -> Option<&EffectiveType> {
        self.effective_type.as_ref()
    }

    /// Whether a plain string is also accepted where a reference is expected
    pub fn is_loosely_typed(&self) -> bool {
        self.loosely_typed
    }

    /// Distinct documentation notes from every use site
    pub fn notes(&self) -> &BTreeSet<String> {
        &self.notes
    }

    /// Errors recorded while inferring the type
    pub fn errors(&self) -> &[DefinitionError] {
        &self.errors
    }

    /// Warnings recorded while inferring the type
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
