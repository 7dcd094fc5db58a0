//! URL state encoding and decoding against derived facet options.

use std::collections::BTreeSet;

use explorer_core::{FacetOptions, FilterState, UrlState, parse_dataset};
use explorer_model::{Dataset, Scope, SpecialFlag, Tier};
use proptest::prelude::*;

const DOCUMENT: &str = include_str!("data/settings.json");

fn fixture() -> (Dataset, FacetOptions) {
    let dataset = parse_dataset(DOCUMENT).unwrap();
    let options = FacetOptions::derive(&dataset, &BTreeSet::new(), None);
    (dataset, options)
}

/// Pick the options whose bit is set in `mask`, or all of them when none is.
fn pick<T: Ord + Clone>(options: &[T], mask: u32) -> BTreeSet<T> {
    let picked: BTreeSet<T> = options
        .iter()
        .enumerate()
        .filter(|(index, _)| mask & (1 << index) != 0)
        .map(|(_, value)| value.clone())
        .collect();
    if picked.is_empty() {
        options.iter().cloned().collect()
    } else {
        picked
    }
}

fn round_trip(state: &FilterState, options: &FacetOptions) -> FilterState {
    let query = UrlState::from_state(state, options).to_query();
    let mut decoded = FilterState::default();
    UrlState::parse_query(&query).apply(&mut decoded, options);
    decoded
}

#[test]
fn full_selections_are_omitted() {
    let (_, options) = fixture();
    let state = FilterState {
        scopes: options.full_scopes(),
        topics: options.full_topics(),
        tiers: options.full_tiers(),
        ..FilterState::default()
    };
    assert_eq!(UrlState::from_state(&state, &options).to_query(), "");
}

#[test]
fn cleared_selection_survives_as_empty_parameter() {
    let (_, options) = fixture();
    let state = FilterState {
        scopes: options.full_scopes(),
        topics: BTreeSet::new(),
        tiers: options.full_tiers(),
        ..FilterState::default()
    };
    let query = UrlState::from_state(&state, &options).to_query();
    assert_eq!(query, "topic=");
    assert!(round_trip(&state, &options).topics.is_empty());
}

#[test]
fn unknown_values_fall_back_to_options() {
    let (_, options) = fixture();
    let mut state = FilterState::default();
    UrlState::parse_query("v=1.0&topic=Nope&tier=obsolete&flags=cloud").apply(&mut state, &options);
    assert_eq!(state.version, None);
    assert_eq!(state.topics, options.full_topics());
    assert_eq!(state.tiers, options.full_tiers());
    assert_eq!(state.flags, BTreeSet::from([SpecialFlag::Cloud]));
}

#[test]
fn prefill_only_touches_query_toggle_and_scopes() {
    let mut state = FilterState::default();
    UrlState::parse_query("q=max&scope=mergetree&tier=beta&changed=1").apply_prefill(&mut state);
    assert_eq!(state.query, "max");
    assert!(state.changed_only);
    assert_eq!(state.scopes, BTreeSet::from([Scope::MergeTree]));
    assert!(state.tiers.is_empty());
}

#[test]
fn topics_with_spaces_are_encoded() {
    let (_, options) = fixture();
    let state = FilterState {
        scopes: options.full_scopes(),
        topics: BTreeSet::from(["Object Storage".to_string(), "Caching".to_string()]),
        tiers: BTreeSet::from([Tier::Experimental]),
        ..FilterState::default()
    };
    insta::assert_snapshot!(
        UrlState::from_state(&state, &options).to_query(),
        @"topic=Caching%2CObject+Storage&tier=experimental"
    );
    assert_eq!(round_trip(&state, &options), state);
}

proptest! {
    #[test]
    fn non_empty_selections_round_trip(
        scope_mask in any::<u32>(),
        topic_mask in any::<u32>(),
        tier_mask in any::<u32>(),
        flag_mask in 0u32..4,
        query in "[a-z\" ]{0,16}",
        version_index in proptest::option::of(0usize..2),
        changed_only in any::<bool>(),
    ) {
        let (dataset, options) = fixture();
        let state = FilterState {
            scopes: pick(&options.scopes, scope_mask),
            topics: pick(&options.topics, topic_mask),
            tiers: pick(&options.tiers, tier_mask),
            flags: options
                .flags
                .iter()
                .enumerate()
                .filter(|(index, _)| flag_mask & (1 << index) != 0)
                .map(|(_, flag)| *flag)
                .collect(),
            query,
            changed_only,
            version: version_index.map(|index| dataset.versions[index].clone()),
        };
        prop_assert_eq!(round_trip(&state, &options), state);
    }
}
