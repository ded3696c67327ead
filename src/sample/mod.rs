//! Sample module
//!
//! Turns parsed JSON usage documents into typed samples.
//!
//! # Features
//!
//! - **Kind Classification**: Maps every JSON value onto a closed set of value kinds
//! - **Instance Detection**: Objects with a `_template`/`_view` key are view references
//! - **Key/Value Bags**: Unmarked objects, map templates and map keys classify as maps
//! - **Notes**: `_note` and `_fieldNotes` become view and field documentation

mod classifier;
mod extract;
mod types;

pub use classifier::{view_marker, KindClassifier};
pub use extract::{extract_samples, SampleExtractor};
pub use types::{sorted_names, Corpus, KindCategory, Sample, ValueKind, ViewUsage};
