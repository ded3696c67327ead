//! Per-unit import de-duplication
//!
//! References are keyed by local name. The first reference registered for
//! a local name wins; a later one is accepted only if it is the same type.
//! A different type with the same local name is rejected with
//! [`Error::ImportConflict`] so the caller can fully qualify it instead.

use super::types::TypeReference;
use crate::error::{Error, Result};
use crate::identity::ViewIdentity;
use std::collections::{BTreeSet, HashMap};

/// Imports of one emitted unit
#[derive(Debug, Clone)]
pub struct ImportSet {
    namespace: String,
    implicit_namespaces: BTreeSet<String>,
    by_local_name: HashMap<String, TypeReference>,
}

impl ImportSet {
    /// Create an import set for a unit in the given namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            implicit_namespaces: BTreeSet::new(),
            by_local_name: HashMap::new(),
        }
    }

    /// Create an import set for a view's unit.
    ///
    /// The view's own local name is reserved so no import can shadow it.
    pub fn for_view(identity: &ViewIdentity) -> Self {
        let mut set = Self::new(identity.namespace.clone());
        let own = TypeReference::from_identity(identity);
        set.by_local_name.insert(own.local_name.clone(), own);
        set
    }

    /// Treat the given namespaces as implicitly available
    #[must_use]
    pub fn with_implicit_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_namespaces
            .extend(namespaces.into_iter().map(Into::into));
        self
    }

    /// Register a reference
    pub fn add(&mut self, reference: TypeReference) -> Result<()> {
        if let Some(existing) = self.by_local_name.get(&reference.local_name) {
            if *existing == reference {
                return Ok(());
            }
            return Err(Error::import_conflict(
                reference.local_name.clone(),
                existing.fully_qualified_name(),
                reference.fully_qualified_name(),
            ));
        }

        self.by_local_name
            .insert(reference.local_name.clone(), reference);
        Ok(())
    }

    /// Register a reference by its fully qualified name
    pub fn add_name(&mut self, fully_qualified_name: &str) -> Result<()> {
        self.add(TypeReference::parse(fully_qualified_name))
    }

    /// Whether this exact reference is registered
    pub fn contains(&self, reference: &TypeReference) -> bool {
        self.by_local_name.get(&reference.local_name) == Some(reference)
    }

    /// Fully qualified names that need an import, sorted.
    ///
    /// Built-ins, implicit namespaces and the unit's own namespace are left out.
    pub fn imports(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .by_local_name
            .values()
            .filter(|r| self.needs_import(r))
            .map(TypeReference::fully_qualified_name)
            .collect();
        names.into_iter().collect()
    }

    fn needs_import(&self, reference: &TypeReference) -> bool {
        !reference.is_builtin()
            && reference.namespace != self.namespace
            && !self.implicit_namespaces.contains(&reference.namespace)
    }
}
