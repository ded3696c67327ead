//! Import de-duplication tests

use super::*;
use crate::error::Error;
use crate::identity::ViewIdentity;
use pretty_assertions::assert_eq;

#[test]
fn test_same_reference_twice() {
    let mut set = ImportSet::new("com.example.page");

    assert!(set.add_name("com.example.card.CardView").is_ok());
    assert!(set.add_name("com.example.card.CardView").is_ok());

    assert_eq!(set.imports(), vec!["com.example.card.CardView".to_string()]);
}

#[test]
fn test_conflicting_local_name_is_rejected() {
    let mut set = ImportSet::new("com.example.page");

    set.add_name("com.example.a.CardView").unwrap();
    let err = set.add_name("com.example.b.CardView").unwrap_err();

    match err {
        Error::ImportConflict {
            local_name,
            existing,
            rejected,
        } => {
            assert_eq!(local_name, "CardView");
            assert_eq!(existing, "com.example.a.CardView");
            assert_eq!(rejected, "com.example.b.CardView");
        }
        other => panic!("unexpected error {other:?}"),
    }

    // first registration wins
    assert!(set.contains(&TypeReference::parse("com.example.a.CardView")));
    assert_eq!(set.imports(), vec!["com.example.a.CardView".to_string()]);
}

#[test]
fn test_excluded_references() {
    let mut set =
        ImportSet::new("com.example.page").with_implicit_namespaces(["java.lang"]);

    set.add(TypeReference::builtin("Boolean")).unwrap();
    set.add_name("java.lang.Number").unwrap();
    set.add_name("com.example.page.HeaderView").unwrap();
    set.add_name("com.example.util.Link").unwrap();
    set.add_name("com.example.card.CardView").unwrap();

    assert_eq!(
        set.imports(),
        vec![
            "com.example.card.CardView".to_string(),
            "com.example.util.Link".to_string()
        ]
    );
}

#[test]
fn test_excluded_reference_still_reserves_local_name() {
    let mut set = ImportSet::new("com.example.page");

    set.add_name("com.example.page.HeaderView").unwrap();

    assert!(set.add_name("com.example.other.HeaderView").is_err());
}

#[test]
fn test_for_view_reserves_own_name() {
    let identity = ViewIdentity::new("page/card.hbs", "com.example.page", "CardView");
    let mut set = ImportSet::for_view(&identity);

    assert!(set.add_name("com.example.page.CardView").is_ok());
    assert!(set.add_name("com.example.other.CardView").is_err());
    assert!(set.imports().is_empty());
}

#[test]
fn test_parse_reference() {
    let r = TypeReference::parse("com.example.CardView");
    assert_eq!(r.namespace, "com.example");
    assert_eq!(r.local_name, "CardView");
    assert_eq!(r.to_string(), "com.example.CardView");

    let builtin = TypeReference::parse("String");
    assert!(builtin.is_builtin());
    assert_eq!(builtin.fully_qualified_name(), "String");
}

#[test]
fn test_root_namespace_reference_is_not_builtin() {
    let identity = ViewIdentity::new("card.hbs", "", "CardView");
    let root = TypeReference::from_identity(&identity);
    assert!(!root.is_builtin());

    let mut set = ImportSet::new("com.example.page");
    set.add(root).unwrap();
    set.add(TypeReference::builtin("String")).unwrap();

    assert_eq!(set.imports(), vec!["CardView".to_string()]);
}
