//! Registry module
//!
//! Owns every view definition of a run and validates them as a whole.
//!
//! # Overview
//!
//! - `CorpusRegistry` - built fresh per run, keyed by view
//! - `validate_corpus` - class-name collision detection across views
//! - `ValidationReport` - every error and warning of the run

mod corpus;
mod report;
mod validate;

pub use corpus::CorpusRegistry;
pub use report::ValidationReport;
pub use validate::validate_corpus;
