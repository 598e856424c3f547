//! End-to-end queries against the checked-in fixture repository.

use std::path::PathBuf;

use a11y_catalog::{
    GetGlobalRulesArgs, GetPatternArgs, ListPatternsArgs, OneOrMany, PatternCatalog,
};
use a11y_content::{PatternStatus, ScopeTag};
use a11y_core::{CatalogConfig, Error};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn catalog() -> PatternCatalog {
    let config = CatalogConfig::new(fixture_root()).with_default_stack("web/react");
    PatternCatalog::from_config(&config).unwrap()
}

// ----------------------------------------------------------------------------
// list_patterns
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_list_patterns_sorted_unique() {
    let list = catalog()
        .list_patterns(ListPatternsArgs {
            stack: Some("web/react".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let ids: Vec<_> = list.body.patterns.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["button", "dialog", "text-field"]);
    assert_eq!(list.body.count, 3);
    assert_eq!(list.contract_version, "1.0");
    assert_eq!(list.cache_ttl_seconds, 300);
    assert_eq!(list.catalog_revision.len(), 64);
}

#[tokio::test]
async fn test_list_patterns_summary_fields() {
    let list = catalog()
        .list_patterns(ListPatternsArgs::default())
        .await
        .unwrap();

    let dialog = &list.body.patterns[1];
    assert_eq!(dialog.status, PatternStatus::Stable);
    assert_eq!(dialog.tags, vec!["focus-management", "overlay"]);
    assert_eq!(dialog.aliases, vec!["lightbox", "modal"]);
    let excerpt = dialog.selection_excerpt.as_ref().unwrap();
    assert_eq!(excerpt.use_when.len(), 2);
    assert_eq!(excerpt.do_not_use_when.len(), 1);

    let text_field = &list.body.patterns[2];
    assert_eq!(text_field.status, PatternStatus::Beta);
    assert!(text_field.selection_excerpt.is_none());
}

#[tokio::test]
async fn test_list_patterns_filters() {
    let catalog = catalog();

    let by_tag = catalog
        .list_patterns(ListPatternsArgs {
            tags: Some(vec!["form".into()]),
            ..Default::default()
        })
        .await
        .unwrap();
    let ids: Vec<_> = by_tag.body.patterns.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["button", "text-field"]);

    let by_alias = catalog
        .list_patterns(ListPatternsArgs {
            query: Some("Modal".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_alias.body.count, 1);
    assert_eq!(by_alias.body.patterns[0].id, "dialog");
}

#[tokio::test]
async fn test_list_patterns_unknown_stack_is_config_error() {
    let err = catalog()
        .list_patterns(ListPatternsArgs {
            stack: Some("web/vue".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "configuration_error");
}

// ----------------------------------------------------------------------------
// get_pattern
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_get_pattern_dialog() {
    let response = catalog()
        .get_pattern(GetPatternArgs {
            stack: Some("web/react".into()),
            id: "dialog".into(),
        })
        .await
        .unwrap();

    let detail = &response.body.pattern;
    let sections = &detail.sections;
    assert_eq!(sections.use_when.len(), 2);
    assert_eq!(
        sections.do_not_use_when,
        vec!["The message is informational and can be dismissed passively"]
    );
    assert_eq!(
        sections.must_haves[0],
        "Move focus into the dialog when it opens\n  - Prefer the first focusable control, or the dialog itself"
    );
    assert_eq!(sections.must_haves.len(), 3);
    assert_eq!(sections.customizable, vec!["Width, padding, and backdrop color"]);
    assert_eq!(sections.donts, vec!["Nest one dialog inside another"]);

    let golden = sections.golden_pattern.as_deref().unwrap();
    assert!(golden.starts_with("```tsx"));
    assert!(golden.contains("aria-labelledby=\"confirm-title\""));

    assert_eq!(
        detail.source_path,
        "patterns/web/react/components/dialog.md"
    );
}

#[tokio::test]
async fn test_get_pattern_continuation_and_empty_golden() {
    let response = catalog()
        .get_pattern(GetPatternArgs {
            stack: None,
            id: "text-field".into(),
        })
        .await
        .unwrap();

    let sections = &response.body.pattern.sections;
    assert_eq!(
        sections.must_haves,
        vec![
            "Associate a visible label with the input",
            "Announce validation errors with `aria-describedby` text that wraps onto a second line",
        ]
    );
    assert!(sections.golden_pattern.is_none());
    assert!(sections.use_when.is_empty());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["pattern"]["sections"]["golden_pattern"].is_null());
    assert_eq!(json["pattern"]["id"], "text-field");
}

#[tokio::test]
async fn test_get_pattern_nonexistent_is_not_found() {
    let err = catalog()
        .get_pattern(GetPatternArgs {
            stack: Some("web/react".into()),
            id: "nonexistent".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

// ----------------------------------------------------------------------------
// get_global_rules
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_global_rules_example_scenario() {
    let response = catalog()
        .get_global_rules(GetGlobalRulesArgs {
            stack: Some("web/react".into()),
            scope: None,
        })
        .await
        .unwrap();

    assert_eq!(response.cache_ttl_seconds, 86400);
    let meta = &response.body.meta;
    assert_eq!(meta.id, "global_ruleset.baseline");
    assert_eq!(meta.cache_ttl_seconds, Some(86400));
    assert_eq!(meta.status, Some(PatternStatus::Stable));

    let rules = &response.body.rules;
    assert_eq!(rules.count, 2);
    let page_title = rules
        .items
        .iter()
        .find(|r| r.id == "global.page-title")
        .unwrap();
    assert_eq!(page_title.scope, vec![ScopeTag::Page]);
    assert_eq!(page_title.must_haves.len(), 2);
    assert_eq!(page_title.snippets.len(), 1);
    assert_eq!(page_title.snippets[0].language, "tsx");
}

#[tokio::test]
async fn test_global_rules_snippets_sorted() {
    let response = catalog()
        .get_global_rules(GetGlobalRulesArgs::default())
        .await
        .unwrap();
    let focus = &response.body.rules.items[0];
    assert_eq!(focus.id, "global.focus-visible");
    let languages: Vec<_> = focus.snippets.iter().map(|s| s.language.as_str()).collect();
    assert_eq!(languages, vec!["css", "js"]);
    assert!(focus.snippets[0].code.starts_with(":focus-visible {"));
    assert!(focus.snippets[0].code.ends_with('}'));
}

#[tokio::test]
async fn test_global_rules_scope_page_only() {
    let response = catalog()
        .get_global_rules(GetGlobalRulesArgs {
            stack: None,
            scope: Some(OneOrMany::Many(vec!["page".into()])),
        })
        .await
        .unwrap();
    let ids: Vec<_> = response
        .body
        .rules
        .items
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["global.page-title"]);
}

#[tokio::test]
async fn test_revision_shared_across_operations() {
    let catalog = catalog();
    let list = catalog
        .list_patterns(ListPatternsArgs::default())
        .await
        .unwrap();
    let rules = catalog
        .get_global_rules(GetGlobalRulesArgs::default())
        .await
        .unwrap();
    assert_eq!(list.catalog_revision, rules.catalog_revision);
}
