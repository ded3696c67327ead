//! Diagnostic report

use crate::error::{DefinitionError, Warning};
use serde::Serialize;
use std::fmt;

/// Every error and warning of a run, for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of view definitions
    pub views: usize,

    /// Number of field definitions across all views
    pub fields: usize,

    /// All accumulated errors
    pub errors: Vec<DefinitionError>,

    /// All accumulated warnings
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    /// A run succeeds only with zero errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in &self.warnings {
            writeln!(f, "WARN: {warning}")?;
        }
        for error in &self.errors {
            writeln!(f, "ERROR: {error}")?;
        }
        write!(
            f,
            "{} view(s), {} field(s), {} error(s), {} warning(s)",
            self.views,
            self.fields,
            self.errors.len(),
            self.warnings.len()
        )
    }
}
