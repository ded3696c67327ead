//! Corpus-wide validation
//!
//! Runs once every view definition exists. Distinct views resolving to the
//! same fully qualified class name can only be detected here.

use super::corpus::CorpusRegistry;
use crate::error::DefinitionError;
use std::collections::BTreeMap;
use tracing::debug;

/// Attach a `NameCollision` error to every view sharing its class name with
/// another view. Existing errors are kept; running it twice adds nothing.
pub fn validate_corpus(registry: &mut CorpusRegistry) {
    let mut by_class_name: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for view in registry.iter() {
        by_class_name
            .entry(view.fully_qualified_name())
            .or_default()
            .push(view.key().to_string());
    }

    by_class_name.retain(|_, members| members.len() > 1);
    if by_class_name.is_empty() {
        return;
    }

    for view in registry.views_mut() {
        let class_name = view.fully_qualified_name();
        let Some(members) = by_class_name.get(&class_name) else {
            continue;
        };

        let own = view.key().to_string();
        let mut others: Vec<String> = members.iter().filter(|m| **m != own).cloned().collect();
        others.sort();

        debug!("{} collides on {} with {:?}", own, class_name, others);

        view.push_error(DefinitionError::NameCollision {
            view: own,
            class_name,
            others,
        });
    }
}
