//! Identity module
//!
//! Resolves each view's source path to a class identity
//! (namespace + local name).
//!
//! # Overview
//!
//! - `NamespaceResolver` - common-prefix elision over the whole corpus
//! - `ViewIdentity` - resolved identity with grammar validation

mod resolver;
mod types;

pub use resolver::{common_directory_prefix, to_pascal_case, NamespaceResolver};
pub use types::ViewIdentity;
pub(crate) use types::qualify;
