//! Definition module
//!
//! Per-view schemas built from grouped samples.
//!
//! # Overview
//!
//! - `FieldDefinition` - all samples of one field plus the inferred type
//! - `ViewDefinition` - all fields of one view plus accumulated errors
//! - `ViewDefinitionBuilder` - groups a corpus by view and validates each view

mod builder;
mod field;
mod view;

pub use builder::ViewDefinitionBuilder;
pub use field::FieldDefinition;
pub use view::ViewDefinition;
