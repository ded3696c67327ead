// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # viewgen
//!
//! Infers a unified, strongly-typed schema for every view (a UI template)
//! from many loosely structured JSON usage samples, and validates that the
//! schema can be emitted as typed source.
//!
//! ## Features
//!
//! - **Sample Extraction**: Walk JSON documents for `_template` view instances
//! - **Type Unification**: Merge every observed value kind into one effective type
//! - **Namespace Resolution**: Common-prefix elision over the whole corpus
//! - **Collect-All Validation**: Every error of every view and field, not just the first
//! - **Import De-duplication**: First registration wins, shadowing references stay qualified
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use viewgen::{extract_samples, CorpusRegistry, GeneratorConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = GeneratorConfig::new("com.example.views");
//!     let document = serde_json::json!({
//!         "_template": "page/home.hbs",
//!         "title": "Home",
//!         "hero": { "_template": "card/hero.hbs", "image": "hero.png" }
//!     });
//!
//!     let corpus = extract_samples(&document, "home.json", &config);
//!     let registry = CorpusRegistry::build(&corpus, &config).into_validated()?;
//!
//!     for view in registry.iter() {
//!         println!("{}", view.fully_qualified_name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         JSON documents                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │ sample
//! ┌──────────┬───────────┬───────┴───────┬────────────┬────────────┐
//! │  Sample  │  Schema   │   Identity    │ Definition │  Imports   │
//! ├──────────┼───────────┼───────────────┼────────────┼────────────┤
//! │ Classify │ Unify     │ Common prefix │ Field      │ First wins │
//! │ Extract  │ Loosen    │ PascalCase    │ View       │ Qualified  │
//! │ Corpus   │ Opaque    │ Grammar check │ Builder    │ fallback   │
//! └──────────┴───────────┴───────┬───────┴────────────┴────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          CorpusRegistry → collisions → ValidationReport         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error and diagnostic types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Generator configuration
pub mod config;

/// Sample extraction and value-kind classification
pub mod sample;

/// Effective type unification
pub mod schema;

/// View identity resolution
pub mod identity;

/// Field and view definitions
pub mod definition;

/// Corpus registry and corpus-wide validation
pub mod registry;

/// Import de-duplication
pub mod imports;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{DefinitionError, Error, Result, ResultExt, Warning};
pub use types::*;

// Re-export commonly used types
pub use config::{ConflictPolicy, GeneratorConfig};
pub use definition::{FieldDefinition, ViewDefinition};
pub use identity::ViewIdentity;
pub use registry::{CorpusRegistry, ValidationReport};
pub use sample::{extract_samples, Corpus, Sample, ValueKind};
pub use schema::EffectiveType;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
