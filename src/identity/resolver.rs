//! Namespace resolution with common-prefix elision

use super::types::ViewIdentity;
use crate::config::GeneratorConfig;
use crate::types::ViewKey;

/// Derives a [`ViewIdentity`] for every view of a corpus.
///
/// The directory segments shared by every view are elided, the remaining
/// directories become the relative namespace and the file name becomes the
/// local name. Resolution never fails; uniqueness is checked later.
#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    namespace_prefix: String,
    name_prefix: String,
    name_suffix: String,
    common_prefix: Vec<String>,
}

impl NamespaceResolver {
    /// Create a resolver for the given set of views
    pub fn new<'a>(views: impl IntoIterator<Item = &'a ViewKey>, config: &GeneratorConfig) -> Self {
        Self {
            namespace_prefix: config.namespace_prefix.trim_matches('.').to_string(),
            name_prefix: config.name_prefix.clone().unwrap_or_default(),
            name_suffix: config.name_suffix.clone(),
            common_prefix: common_directory_prefix(views),
        }
    }

    /// Directory segments elided from every view
    pub fn common_prefix(&self) -> &[String] {
        &self.common_prefix
    }

    /// Resolve one view
    pub fn resolve(&self, key: &ViewKey) -> ViewIdentity {
        let directories = key.directory_segments();
        let relative = directories
            .get(self.common_prefix.len()..)
            .unwrap_or_default();

        let namespace = std::iter::once(self.namespace_prefix.as_str())
            .chain(relative.iter().copied())
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".");

        let local_name = format!(
            "{}{}{}",
            self.name_prefix,
            to_pascal_case(file_stem(key.file_name())),
            self.name_suffix
        );

        ViewIdentity::new(key.clone(), namespace, local_name)
    }
}

/// Longest run of leading directory segments shared by every view.
///
/// Only whole directory segments count; the file name never does.
pub fn common_directory_prefix<'a>(views: impl IntoIterator<Item = &'a ViewKey>) -> Vec<String> {
    let mut views = views.into_iter();

    let Some(first) = views.next() else {
        return Vec::new();
    };

    let mut prefix: Vec<&str> = first.directory_segments();

    for view in views {
        let shared = prefix
            .iter()
            .zip(view.directory_segments())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);

        if prefix.is_empty() {
            break;
        }
    }

    prefix.into_iter().map(String::from).collect()
}

/// File name without its last extension
fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// `article-body.min` → `ArticleBodyMin`
///
/// Only separators (`-`, `_`, `.`, whitespace) are removed; every other
/// character is kept so that identity validation can reject it.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| matches!(c, '-' | '_' | '.') || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
