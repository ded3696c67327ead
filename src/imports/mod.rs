//! Imports module
//!
//! Tracks the external types referenced by one emitted unit.

mod set;
mod types;

pub use set::ImportSet;
pub use types::{ReferencePlan, TypeReference};

#[cfg(test)]
mod tests;
