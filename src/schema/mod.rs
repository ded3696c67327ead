//! Schema module
//!
//! Infers one effective type per field from the kinds observed across
//! every sample of that field.
//!
//! # Features
//!
//! - **Single Kind**: One observed category maps straight to its type
//! - **Recursive Items**: List and map item kinds are unified one level down
//! - **Polymorphic References**: Every referenced view is kept, none wins
//! - **Loose References**: `{ObjectReference, String}` is allowed with a warning
//! - **Conflict Policy**: Conflicts are errors, or opaque types when configured

mod types;
mod unify;

pub use types::{EffectiveType, Loosening, Unified, UnifyOptions};
pub use unify::{unify_kinds, UnifyError};
