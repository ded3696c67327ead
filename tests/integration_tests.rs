//! Integration tests over JSON corpora
//!
//! Tests the full end-to-end flow: JSON documents → samples → registry → report

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use viewgen::cli::{Cli, Runner};
use viewgen::{
    extract_samples, ConflictPolicy, Corpus, CorpusRegistry, DefinitionError, EffectiveType,
    Error, GeneratorConfig, ViewKey, Warning,
};

fn build(documents: &[Value], config: &GeneratorConfig) -> CorpusRegistry {
    let mut corpus = Corpus::new();
    for (i, document) in documents.iter().enumerate() {
        corpus.extend(extract_samples(document, &format!("doc{i}.json"), config));
    }
    CorpusRegistry::build(&corpus, config)
}

fn config() -> GeneratorConfig {
    GeneratorConfig::new("com.example.views")
}

// ============================================================================
// End-to-End Inference Tests
// ============================================================================

#[test]
fn test_page_with_nested_modules() {
    let documents = vec![
        json!({
            "_template": "styleguide/page/home.hbs",
            "_note": "Landing page",
            "title": "Welcome",
            "modules": [
                { "_template": "styleguide/module/teaser.hbs", "headline": "First", "count": 3 },
                { "_template": "styleguide/module/promo.hbs", "headline": "Sale", "active": true }
            ]
        }),
        json!({
            "_template": "styleguide/page/home.hbs",
            "title": "Welcome back",
            "modules": [
                { "_template": "styleguide/module/teaser.hbs", "headline": "Again", "count": 1 }
            ]
        }),
    ];

    let registry = build(&documents, &config());

    assert!(!registry.has_errors());
    assert_eq!(registry.len(), 3);

    let home = registry.get(&ViewKey::new("styleguide/page/home.hbs")).unwrap();
    assert_eq!(home.fully_qualified_name(), "com.example.views.page.HomeView");
    assert_eq!(home.notes().iter().collect::<Vec<_>>(), vec!["Landing page"]);
    assert_eq!(
        home.field("title").unwrap().effective_type(),
        Some(&EffectiveType::String)
    );
    assert_eq!(
        home.field("modules").unwrap().effective_type(),
        Some(&EffectiveType::list(EffectiveType::reference([
            "styleguide/module/promo.hbs",
            "styleguide/module/teaser.hbs"
        ])))
    );
    assert_eq!(
        registry.value_types(home.field("modules").unwrap()),
        vec![
            "com.example.views.module.PromoView".to_string(),
            "com.example.views.module.TeaserView".to_string()
        ]
    );

    let plan = registry
        .references_for(&ViewKey::new("styleguide/page/home.hbs"))
        .unwrap();
    assert_eq!(
        plan.imports,
        vec![
            "com.example.views.module.PromoView".to_string(),
            "com.example.views.module.TeaserView".to_string()
        ]
    );
}

#[test]
fn test_polymorphic_list_items() {
    let tile = json!({ "_template": "tile.hbs", "label": "t" });
    let banner = json!({ "_template": "banner.hbs", "label": "b" });
    let documents = vec![
        json!({ "_template": "card.hbs", "items": [tile.clone()] }),
        json!({ "_template": "card.hbs", "items": [tile.clone(), banner] }),
        json!({ "_template": "card.hbs", "items": [tile] }),
    ];

    let registry = build(&documents, &config());

    assert!(!registry.has_errors());
    let card = registry.get_by_path("card.hbs").unwrap();
    let items = card.field("items").unwrap();
    assert_eq!(items.samples().len(), 3);
    assert_eq!(
        items.effective_type(),
        Some(&EffectiveType::list(EffectiveType::reference([
            "banner.hbs",
            "tile.hbs"
        ])))
    );
}

#[test]
fn test_plain_objects_become_maps() {
    let documents = vec![json!({
        "_template": "link.hbs",
        "target": { "href": "/home", "rel": "nofollow" },
        "displayOptions": { "_template": "ignored", "wide": true }
    })];

    let registry = build(&documents, &config());
    let link = registry.get_by_path("link.hbs").unwrap();

    assert_eq!(
        link.field("target").unwrap().effective_type(),
        Some(&EffectiveType::map(EffectiveType::String))
    );
    assert_eq!(
        link.field("displayOptions").unwrap().effective_type(),
        Some(&EffectiveType::map(EffectiveType::Boolean))
    );
}

#[test]
fn test_null_values_are_not_observed() {
    let documents = vec![
        json!({ "_template": "card.hbs", "subtitle": null, "title": "A" }),
        json!({ "_template": "card.hbs", "subtitle": "Sub", "title": "B" }),
    ];

    let registry = build(&documents, &config());
    let card = registry.get_by_path("card.hbs").unwrap();

    assert!(!registry.has_errors());
    assert_eq!(card.field("subtitle").unwrap().samples().len(), 1);
}

#[test]
fn test_view_without_fields_is_empty_definition() {
    let documents = vec![json!({ "_template": "divider.hbs" })];

    let registry = build(&documents, &config());
    let divider = registry.get_by_path("divider.hbs").unwrap();

    assert_eq!(divider.field_count(), 0);
    assert!(!divider.has_errors());
}

// ============================================================================
// Loose Typing Tests
// ============================================================================

fn loosely_typed_documents() -> Vec<Value> {
    vec![
        json!({ "_template": "teaser.hbs", "media": "plain.png" }),
        json!({
            "_template": "teaser.hbs",
            "media": { "_template": "image.hbs", "src": "hero.png" }
        }),
    ]
}

#[test]
fn test_reference_or_string_warns() {
    let registry = build(&loosely_typed_documents(), &config());

    assert!(!registry.has_errors());

    let media = registry
        .get_by_path("teaser.hbs")
        .unwrap()
        .field("media")
        .unwrap();
    assert!(media.is_loosely_typed());
    assert_eq!(
        media.effective_type(),
        Some(&EffectiveType::reference(["image.hbs"]))
    );

    let warnings: Vec<&Warning> = registry.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], Warning::LooselyTyped { .. }));
}

#[test]
fn test_strict_mode_refuses_loosening() {
    let registry = build(&loosely_typed_documents(), &config().with_strict(true));

    assert_eq!(registry.error_count(), 1);
    assert_eq!(
        registry.errors().next().unwrap().to_string(),
        "(teaser.hbs - media) field has conflicting value types [ObjectReference(image.hbs), String]"
    );
}

#[test]
fn test_conflicting_types_policies() {
    let documents = vec![
        json!({ "_template": "flag.hbs", "enabled": true }),
        json!({ "_template": "flag.hbs", "enabled": 1 }),
    ];

    let registry = build(&documents, &config());
    let errors: Vec<&DefinitionError> = registry.errors().collect();
    assert_eq!(
        errors,
        vec![&DefinitionError::ConflictingTypes {
            view: "flag.hbs".to_string(),
            field: "enabled".to_string(),
            kinds: vec!["Boolean".to_string(), "Number".to_string()],
        }]
    );

    let lenient = build(
        &documents,
        &config().with_conflict_policy(ConflictPolicy::Opaque),
    );
    assert!(!lenient.has_errors());
    assert_eq!(
        lenient
            .get_by_path("flag.hbs")
            .unwrap()
            .field("enabled")
            .unwrap()
            .effective_type(),
        Some(&EffectiveType::Opaque)
    );
}

// ============================================================================
// Corpus Validation Tests
// ============================================================================

#[test]
fn test_collisions_and_field_errors_are_all_reported() {
    let documents = vec![
        json!({ "_template": "a/b/teaser.hbs", "items": [] }),
        json!({ "_template": "a/b/teaser.html", "title": "x" }),
        json!({ "_template": "a/c/other.hbs", "title": "y" }),
    ];

    let registry = build(&documents, &config());
    let report = registry.report();

    assert_eq!(report.views, 3);
    assert_eq!(report.errors.len(), 3);
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e, DefinitionError::NoValue { field, .. } if field == "items")));
    assert_eq!(
        report
            .errors
            .iter()
            .filter(|e| matches!(e, DefinitionError::NameCollision { .. }))
            .count(),
        2
    );

    let other = registry.get_by_path("a/c/other.hbs").unwrap();
    assert_eq!(other.fully_qualified_name(), "com.example.views.c.OtherView");

    match registry.into_validated() {
        Err(Error::Validation { view_count, .. }) => assert_eq!(view_count, 2),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_invalid_identity_is_collected() {
    let documents = vec![
        json!({ "_template": "my-dir/card.hbs", "title": "x" }),
        json!({ "_template": "other/card.hbs", "title": "y" }),
    ];

    let registry = build(&documents, &config());

    assert_eq!(registry.error_count(), 1);
    assert!(matches!(
        registry.errors().next().unwrap(),
        DefinitionError::InvalidIdentity { view, .. } if view == "my-dir/card.hbs"
    ));
}

#[test]
fn test_runs_are_byte_identical() {
    let documents = vec![
        json!({ "_template": "x/page.hbs", "b": 1, "a": "s", "child": { "_template": "y/part.hbs", "z": false } }),
        json!({ "_template": "y/part.hbs", "z": true, "_fieldNotes": { "z": "toggle" } }),
    ];
    let mut reversed = documents.clone();
    reversed.reverse();

    let first = serde_json::to_string(&build(&documents, &config())).unwrap();
    let second = serde_json::to_string(&build(&documents, &config())).unwrap();

    assert_eq!(first, second);

    let report_a = build(&documents, &config()).report().to_string();
    let report_b = build(&reversed, &config()).report().to_string();
    assert_eq!(report_a, report_b);
}

// ============================================================================
// CLI Tests
// ============================================================================

fn write_json(dir: &tempfile::TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{value}").unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn test_cli_check_clean_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let home = write_json(
        &dir,
        "home.json",
        &json!({ "_template": "page/home.hbs", "title": "Home" }),
    );

    let cli = <Cli as clap::Parser>::parse_from(["viewgen", "-p", "com.example", "check", &home]);

    assert!(Runner::new(cli).run().await.is_ok());
}

#[tokio::test]
async fn test_cli_check_fails_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_json(
        &dir,
        "one.json",
        &json!({ "_template": "card.hbs", "flag": true }),
    );
    let second = write_json(
        &dir,
        "two.json",
        &json!({ "_template": "card.hbs", "flag": "yes" }),
    );

    let cli = <Cli as clap::Parser>::parse_from(["viewgen", "check", &first, &second]);

    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(matches!(err, Error::Validation { error_count: 1, .. }));
}

#[tokio::test]
async fn test_cli_schema_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_json(
        &dir,
        "corpus.json",
        &json!([
            { "_template": "page/home.hbs", "hero": { "_template": "card/hero.hbs", "src": "a" } }
        ]),
    );

    let mut config_file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    writeln!(
        config_file,
        "namespace_prefix: com.example\nname_prefix: Sg\nconflict_policy: opaque"
    )
    .unwrap();
    let config_path = config_file.path().to_string_lossy().to_string();

    let cli = <Cli as clap::Parser>::parse_from([
        "viewgen",
        "--config",
        &config_path,
        "--format",
        "pretty",
        "schema",
        &corpus,
    ]);

    assert!(Runner::new(cli).run().await.is_ok());
}

#[tokio::test]
async fn test_cli_missing_file() {
    let cli = <Cli as clap::Parser>::parse_from(["viewgen", "check", "/no/such/corpus.json"]);

    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}
