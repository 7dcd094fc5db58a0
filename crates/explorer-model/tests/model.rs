//! Tests for explorer-model types.

use explorer_model::{Dataset, Scope, Tier};

const DOCUMENT: &str = r#"{
  "versions": ["v25.7.1.1-stable", "v25.8.1.1-lts"],
  "settings": [
    {
      "name": "max_threads",
      "type": "MaxThreads",
      "description": "The maximum number of query processing threads",
      "flags": "0",
      "alias": null,
      "category": "Performance",
      "cloud_only": false,
      "versions": {
        "v25.7.1.1-stable": {"default": "0", "tier": "production", "changed_from_prev": false},
        "v25.8.1.1-lts": {"default": 0, "tier": "production", "changed_from_prev": true}
      },
      "history": [{"version_minor": "25.8", "new_default": "0", "comment": "Auto"}],
      "related": [{"name": "max_insert_threads", "score": 1.25, "reasons": ["token_overlap"]}],
      "mentions": {"docs": [{"url": "https://example.com/docs#max_threads", "excerpt": "Threads"}]}
    }
  ],
  "merge_tree_settings": [
    {
      "name": "index_granularity",
      "type": "UInt64",
      "description": null,
      "flags": "IMPORTANT",
      "versions": {"v25.8.1.1-lts": {"default": "8192", "tier": "legendary"}}
    }
  ]
}"#;

#[test]
fn dataset_deserializes_with_missing_scope() {
    let dataset: Dataset = serde_json::from_str(DOCUMENT).expect("parse dataset");
    assert_eq!(dataset.len(), 2);
    assert!(dataset.format.is_empty());
    assert_eq!(dataset.latest_version(), Some("v25.8.1.1-lts"));
    assert!(dataset.has_version("v25.7.1.1-stable"));
}

#[test]
fn numeric_defaults_become_strings() {
    let dataset: Dataset = serde_json::from_str(DOCUMENT).expect("parse dataset");
    let setting = dataset
        .find(Scope::Session, "MAX_THREADS")
        .expect("setting present");
    let info = setting.version_info("v25.8.1.1-lts").expect("version");
    assert_eq!(info.default, "0");
    assert!(info.changed_from_prev);
    assert!(setting.changed_in("v25.8.1.1-lts"));
    assert!(!setting.changed_in("v25.7.1.1-stable"));
    assert_eq!(setting.related[0].reasons, vec!["token_overlap".to_string()]);
    assert!(setting.has_citations());
}

#[test]
fn null_and_unknown_fields_are_tolerated() {
    let dataset: Dataset = serde_json::from_str(DOCUMENT).expect("parse dataset");
    let setting = dataset.find_any("index_granularity").expect("setting");
    assert_eq!(setting.description, "");
    assert!(setting.history.is_empty());
    assert!(setting.mentions.is_empty());
    let info = setting.version_info("v25.8.1.1-lts").expect("version");
    assert_eq!(info.tier, None);
    assert_eq!(setting.effective_tier("v25.8.1.1-lts"), Tier::Production);
    assert!(setting.is_important(None));
}

#[test]
fn empty_document_is_an_empty_dataset() {
    let dataset: Dataset = serde_json::from_str("{}").expect("parse dataset");
    assert!(dataset.is_empty());
    assert_eq!(dataset.latest_version(), None);
}

#[test]
fn published_docs_link_and_importance_are_honoured() {
    let document = r#"{
      "format_settings": [
        {
          "name": "format_csv_delimiter",
          "docs_url": "https://example.com/docs/formats#format_csv_delimiter",
          "versions": {"25.8": {"default": ",", "important": true}, "25.7": {"default": ","}}
        },
        {"name": "Input_Format_Null_As_Default", "docs_url": "  "}
      ]
    }"#;
    let dataset: Dataset = serde_json::from_str(document).expect("parse dataset");
    let delimiter = &dataset.format[0];
    assert_eq!(
        delimiter.docs_url(),
        "https://example.com/docs/formats#format_csv_delimiter"
    );
    assert!(delimiter.is_important(Some("25.8")));
    assert!(!delimiter.is_important(Some("25.7")));
    assert!(!delimiter.is_important(None));

    // Blank links fall back to the scope page; the name keeps its case.
    assert!(
        dataset.format[1]
            .docs_url()
            .ends_with("#Input_Format_Null_As_Default")
    );
}
