//! Filter engine and facet counting over a small annotated dataset.

use std::collections::BTreeSet;

use explorer_core::{
    FacetOptions, FilterState, Summary, compute_counts, filter_dataset, parse_dataset,
    passes_filter,
};
use explorer_model::{Dataset, Scope, SpecialFlag, Tier};

const DOCUMENT: &str = include_str!("data/settings.json");

fn fixture() -> (Dataset, FacetOptions) {
    let dataset = parse_dataset(DOCUMENT).unwrap();
    let options = FacetOptions::derive(&dataset, &BTreeSet::new(), None);
    (dataset, options)
}

fn names(dataset: &Dataset, state: &FilterState, options: &FacetOptions) -> Vec<String> {
    filter_dataset(dataset, state, options)
        .iter()
        .map(|setting| setting.name.clone())
        .collect()
}

fn topics(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn options_cover_categories_and_inferred_tags() {
    let (_, options) = fixture();
    assert_eq!(options.version.as_deref(), Some("25.8"));
    assert_eq!(
        options.topics,
        vec![
            "Caching",
            "Experimental",
            "Formats",
            "Joins",
            "Limits",
            "Memory",
            "Merges",
            "Object Storage",
            "Performance",
            "Threads",
            "Toggles",
        ]
    );
    assert_eq!(
        options.tiers,
        vec![Tier::Production, Tier::Beta, Tier::Experimental]
    );
}

#[test]
fn options_follow_selected_scopes_and_version() {
    let dataset = parse_dataset(DOCUMENT).unwrap();
    let format_only = FacetOptions::derive(&dataset, &BTreeSet::from([Scope::Format]), None);
    assert_eq!(format_only.topics, vec!["Formats"]);
    assert_eq!(format_only.tiers, vec![Tier::Production]);

    let older = FacetOptions::derive(&dataset, &BTreeSet::new(), Some("25.7"));
    assert_eq!(older.tiers, vec![Tier::Production]);
}

#[test]
fn session_scenario_selects_exactly_max_threads() {
    let (dataset, options) = fixture();
    let state = FilterState {
        scopes: BTreeSet::from([Scope::Session]),
        tiers: BTreeSet::from([Tier::Production]),
        topics: topics(&["Performance"]),
        ..FilterState::default()
    };
    assert_eq!(names(&dataset, &state, &options), vec!["max_threads"]);
}

#[test]
fn phrase_absent_from_every_record_yields_nothing() {
    let (dataset, options) = fixture();
    let state = FilterState {
        query: "\"not present\"".to_string(),
        ..FilterState::default()
    };
    let result = filter_dataset(&dataset, &state, &options);
    assert!(result.is_empty());
    let counts = compute_counts(&dataset, &state, &options);
    assert_eq!(counts.visible, 0);
    assert_eq!(
        Summary {
            visible: counts.visible,
            total: counts.total
        }
        .to_string(),
        "Showing 0 of 6 settings"
    );
}

#[test]
fn quoted_phrase_and_word_must_both_match() {
    let (dataset, options) = fixture();
    let phrase = FilterState {
        query: "\"join algorithm\" used".to_string(),
        ..FilterState::default()
    };
    assert_eq!(names(&dataset, &phrase, &options), vec!["join_algorithm"]);

    let split = FilterState {
        query: "\"algorithm join\"".to_string(),
        ..FilterState::default()
    };
    assert!(names(&dataset, &split, &options).is_empty());

    let substring = FilterState {
        query: "THREAD".to_string(),
        ..FilterState::default()
    };
    assert_eq!(names(&dataset, &substring, &options), vec!["max_threads"]);
}

#[test]
fn every_topic_selected_equals_none_selected() {
    let (dataset, options) = fixture();
    let all = FilterState {
        topics: options.full_topics(),
        ..FilterState::default()
    };
    assert_eq!(
        names(&dataset, &all, &options),
        names(&dataset, &FilterState::default(), &options)
    );
}

#[test]
fn output_order_is_scope_then_dataset_order() {
    let (dataset, options) = fixture();
    assert_eq!(
        names(&dataset, &FilterState::default(), &options),
        vec![
            "max_threads",
            "join_algorithm",
            "allow_experimental_analyzer",
            "merge_max_block_size",
            "s3_disk_cache_enabled",
            "format_csv_delimiter",
        ]
    );
}

#[test]
fn reloading_gives_identical_results() {
    let (first, options) = fixture();
    let second = parse_dataset(DOCUMENT).unwrap();
    let state = FilterState {
        query: "the".to_string(),
        flags: BTreeSet::from([SpecialFlag::Cited]),
        ..FilterState::default()
    };
    assert_eq!(
        names(&first, &state, &options),
        names(&second, &state, &options)
    );
    assert_eq!(
        names(&first, &state, &options),
        vec!["max_threads", "format_csv_delimiter"]
    );
}

#[test]
fn missing_version_entry_never_passes() {
    let (dataset, options) = fixture();
    let state = FilterState {
        version: Some("25.7".to_string()),
        ..FilterState::default()
    };
    let analyzer = dataset
        .find(Scope::Session, "allow_experimental_analyzer")
        .unwrap();
    assert!(!passes_filter(analyzer, &state, &options));
    assert_eq!(filter_dataset(&dataset, &state, &options).len(), 4);
}

#[test]
fn counts_ignore_their_own_family() {
    let (dataset, options) = fixture();
    let state = FilterState {
        scopes: BTreeSet::from([Scope::Session]),
        tiers: BTreeSet::from([Tier::Beta]),
        ..FilterState::default()
    };
    let counts = compute_counts(&dataset, &state, &options);

    assert_eq!(counts.visible, 1);
    assert_eq!(counts.total, 6);
    // Tier counts keep the scope restriction but lift the tier one.
    assert_eq!(counts.tiers[&Tier::Production], 2);
    assert_eq!(counts.tiers[&Tier::Beta], 1);
    assert_eq!(counts.tiers[&Tier::Experimental], 0);
    // Scope counts lift the scope restriction but keep the tier one.
    assert_eq!(counts.scopes[&Scope::Session], 1);
    assert_eq!(counts.scopes[&Scope::MergeTree], 0);
    assert_eq!(counts.topics["Toggles"], 1);
    assert_eq!(counts.topics["Joins"], 0);
}

#[test]
fn flag_counts_track_cloud_and_citations() {
    let (dataset, options) = fixture();
    let counts = compute_counts(&dataset, &FilterState::default(), &options);
    assert_eq!(counts.flags[&SpecialFlag::Cloud], 1);
    assert_eq!(counts.flags[&SpecialFlag::Cited], 2);
    assert_eq!(counts.topics["Threads"], 1);
    assert_eq!(counts.visible, 6);
}

#[test]
fn changed_only_respects_selected_version() {
    let (dataset, options) = fixture();
    let latest = FilterState {
        changed_only: true,
        ..FilterState::default()
    };
    assert_eq!(
        names(&dataset, &latest, &options),
        vec!["join_algorithm", "allow_experimental_analyzer"]
    );
    let older = FilterState {
        changed_only: true,
        version: Some("25.7".to_string()),
        ..FilterState::default()
    };
    assert!(names(&dataset, &older, &options).is_empty());
}
