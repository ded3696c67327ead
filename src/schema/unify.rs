//! Field type unification
//!
//! Reduces the set of kinds observed for one field to a single
//! [`EffectiveType`]:
//!
//! 1. no kinds: `NoValue`
//! 2. one kind category: that type, with list/map items unified one level down
//! 3. exactly `{ObjectReference, String}`: a reference, loosely typed (non-strict only)
//! 4. anything else: `ConflictingTypes`, or `Opaque` under the opaque policy

use super::types::{EffectiveType, Loosening, Unified, UnifyOptions};
use crate::config::ConflictPolicy;
use crate::sample::{sorted_names, KindCategory, ValueKind};
use std::collections::BTreeSet;
use thiserror::Error;

/// Why a set of kinds could not be unified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    /// Nothing inferable was observed
    #[error("field must have at least one observed value")]
    NoValue,

    /// The kinds cannot be combined
    #[error("field has conflicting value types [{}]", .kinds.join(", "))]
    ConflictingTypes {
        /// Sorted kind names that clashed
        kinds: Vec<String>,
    },
}

/// Unify a set of observed kinds into one effective type
pub fn unify_kinds(
    kinds: &BTreeSet<ValueKind>,
    options: UnifyOptions,
) -> Result<Unified, UnifyError> {
    let categories: BTreeSet<KindCategory> = kinds.iter().map(ValueKind::category).collect();

    match categories.len() {
        0 => Err(UnifyError::NoValue),
        1 => unify_single(kinds, categories.into_iter().next(), options),
        2 if !options.strict
            && categories.contains(&KindCategory::ObjectReference)
            && categories.contains(&KindCategory::String) =>
        {
            let mut unified = Unified::exact(EffectiveType::ObjectReference(reference_targets(
                kinds,
            )));
            unified.loosenings.push(Loosening::ReferenceOrString {
                kinds: sorted_names(kinds),
            });
            Ok(unified)
        }
        _ => conflict(kinds, options),
    }
}

fn unify_single(
    kinds: &BTreeSet<ValueKind>,
    category: Option<KindCategory>,
    options: UnifyOptions,
) -> Result<Unified, UnifyError> {
    match category {
        None => Err(UnifyError::NoValue),
        Some(KindCategory::Boolean) => Ok(Unified::exact(EffectiveType::Boolean)),
        Some(KindCategory::String) => Ok(Unified::exact(EffectiveType::String)),
        Some(KindCategory::Number) => Ok(Unified::exact(EffectiveType::Number)),
        Some(KindCategory::ObjectReference) => Ok(Unified::exact(
            EffectiveType::ObjectReference(reference_targets(kinds)),
        )),
        Some(KindCategory::List) => {
            let inner = unify_kinds(&item_kinds(kinds), options)?;
            Ok(Unified {
                effective_type: EffectiveType::list(inner.effective_type),
                loosenings: inner.loosenings,
            })
        }
        Some(KindCategory::Map) => {
            let inner = unify_kinds(&item_kinds(kinds), options)?;
            Ok(Unified {
                effective_type: EffectiveType::map(inner.effective_type),
                loosenings: inner.loosenings,
            })
        }
    }
}

fn conflict(kinds: &BTreeSet<ValueKind>, options: UnifyOptions) -> Result<Unified, UnifyError> {
    let names = sorted_names(kinds);

    if !options.strict && options.conflict_policy == ConflictPolicy::Opaque {
        let mut unified = Unified::exact(EffectiveType::Opaque);
        unified
            .loosenings
            .push(Loosening::OpaqueFallback { kinds: names });
        return Ok(unified);
    }

    Err(UnifyError::ConflictingTypes { kinds: names })
}

/// Union of the item kinds of every list/map kind in the set
fn item_kinds(kinds: &BTreeSet<ValueKind>) -> BTreeSet<ValueKind> {
    kinds
        .iter()
        .filter_map(|kind| match kind {
            ValueKind::List(items) | ValueKind::Map(items) => Some(items),
            _ => None,
        })
        .flatten()
        .cloned()
        .collect()
}

/// Every distinct reference target in the set
fn reference_targets(kinds: &BTreeSet<ValueKind>) -> BTreeSet<crate::types::ViewKey> {
    kinds
        .iter()
        .filter_map(|kind| match kind {
            ValueKind::ObjectReference(view) => Some(view.clone()),
            _ => None,
        })
        .collect()
}
