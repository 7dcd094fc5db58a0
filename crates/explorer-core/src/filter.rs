//! Filter engine.
//!
//! [`FilterState`] is the plain-data source of truth for every facet control.
//! [`Criteria`] compiles it against the current facet options into the pure
//! predicate used for the result list and, with one dimension suppressed at a
//! time, for facet counts.

use std::collections::BTreeSet;
use std::fmt;

use explorer_model::{Dataset, Scope, Setting, SpecialFlag, Tier};

use crate::facets::FacetOptions;
use crate::search::{matches_all, tokenize};

/// Current selections of every filter control.
///
/// An empty facet set means "no filtering on that facet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub scopes: BTreeSet<Scope>,
    pub topics: BTreeSet<String>,
    pub tiers: BTreeSet<Tier>,
    pub flags: BTreeSet<SpecialFlag>,
    pub query: String,
    pub changed_only: bool,
    /// Explicitly selected version; `None` follows the newest version.
    pub version: Option<String>,
}

/// A filterable dimension, used to suppress one restriction when counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Scope,
    Topic,
    Tier,
    Flag,
}

/// Compiled, self-contained form of a [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    version: Option<String>,
    /// `None` means unrestricted.
    scopes: Option<BTreeSet<Scope>>,
    topics: Option<BTreeSet<String>>,
    tiers: Option<BTreeSet<Tier>>,
    flags: BTreeSet<SpecialFlag>,
    changed_only: bool,
    tokens: Vec<String>,
}

impl Criteria {
    /// Compile `state` against the facet options it was built from.
    ///
    /// The topic restriction is dropped when the selection is empty or its
    /// size equals the number of topic options.
    pub fn new(state: &FilterState, options: &FacetOptions) -> Self {
        let version = state.version.clone().or_else(|| options.version.clone());
        let scopes = (!state.scopes.is_empty() && state.scopes.len() < Scope::all().len())
            .then(|| state.scopes.clone());
        let topics = (!state.topics.is_empty() && state.topics.len() != options.topics.len())
            .then(|| state.topics.clone());
        let tiers = (!state.tiers.is_empty()).then(|| state.tiers.clone());
        Self {
            version,
            scopes,
            topics,
            tiers,
            flags: state.flags.clone(),
            changed_only: state.changed_only,
            tokens: tokenize(&state.query),
        }
    }

    /// Copy of these criteria with one dimension's restriction removed.
    pub fn ignoring(&self, dimension: Dimension) -> Self {
        let mut criteria = self.clone();
        match dimension {
            Dimension::Scope => criteria.scopes = None,
            Dimension::Topic => criteria.topics = None,
            Dimension::Tier => criteria.tiers = None,
            Dimension::Flag => criteria.flags.clear(),
        }
        criteria
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn includes_scope(&self, scope: Scope) -> bool {
        self.scopes
            .as_ref()
            .is_none_or(|scopes| scopes.contains(&scope))
    }

    /// The record predicate. Scope is handled by [`Criteria::includes_scope`]
    /// because it selects collections rather than records.
    pub fn matches(&self, setting: &Setting) -> bool {
        let Some(version) = self.version.as_deref() else {
            return false;
        };
        let Some(info) = setting.version_info(version) else {
            return false;
        };
        if let Some(tiers) = &self.tiers {
            if !tiers.contains(&setting.effective_tier(version)) {
                return false;
            }
        }
        if let Some(topics) = &self.topics {
            if !setting.topics().any(|topic| topics.contains(topic)) {
                return false;
            }
        }
        for flag in &self.flags {
            let passes = match flag {
                SpecialFlag::Cloud => setting.cloud_only,
                SpecialFlag::Cited => setting.has_citations(),
            };
            if !passes {
                return false;
            }
        }
        if self.changed_only && !info.changed_from_prev {
            return false;
        }
        matches_all(&setting.annotations.haystack, &self.tokens)
    }

    /// Every matching record, in scope order then dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Setting> {
        dataset
            .iter()
            .filter(|(scope, setting)| self.includes_scope(*scope) && self.matches(setting))
            .map(|(_, setting)| setting)
            .collect()
    }
}

/// Pure predicate over one record.
pub fn passes_filter(setting: &Setting, state: &FilterState, options: &FacetOptions) -> bool {
    let criteria = Criteria::new(state, options);
    criteria.includes_scope(setting.scope()) && criteria.matches(setting)
}

/// Filter the whole dataset with `state`.
pub fn filter_dataset<'a>(
    dataset: &'a Dataset,
    state: &FilterState,
    options: &FacetOptions,
) -> Vec<&'a Setting> {
    Criteria::new(state, options).apply(dataset)
}

/// The "Showing N of M settings" line above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub visible: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.total == 1 { "setting" } else { "settings" };
        write!(f, "Showing {} of {} {noun}", self.visible, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_dataset;

    const DOCUMENT: &str = r#"{
        "versions": ["25.7", "25.8"],
        "settings": [
            {"name": "max_threads", "category": "Performance", "description": "Threads for queries",
             "versions": {"25.7": {"default": "0", "tier": "production"},
                          "25.8": {"default": "auto", "tier": "production", "changed_from_prev": true}}},
            {"name": "allow_experimental_join", "category": "Joins", "flags": "EXPERIMENTAL",
             "cloud_only": true, "description": "Experimental join algorithm",
             "versions": {"25.8": {"default": "0"}}}
        ]
    }"#;

    fn fixture() -> (Dataset, FacetOptions) {
        let dataset = parse_dataset(DOCUMENT).unwrap();
        let options = FacetOptions::derive(&dataset, &BTreeSet::new(), None);
        (dataset, options)
    }

    #[test]
    fn default_state_shows_records_of_latest_version() {
        let (dataset, options) = fixture();
        let names: Vec<_> = filter_dataset(&dataset, &FilterState::default(), &options)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["max_threads", "allow_experimental_join"]);
    }

    #[test]
    fn version_presence_is_required() {
        let (dataset, options) = fixture();
        let state = FilterState {
            version: Some("25.7".to_string()),
            ..FilterState::default()
        };
        let result = filter_dataset(&dataset, &state, &options);
        assert_eq!(result.len(), 1);
        assert!(!passes_filter(&dataset.session[1], &state, &options));
    }

    #[test]
    fn tier_falls_back_to_flags() {
        let (dataset, options) = fixture();
        let state = FilterState {
            tiers: BTreeSet::from([Tier::Experimental]),
            ..FilterState::default()
        };
        let result = filter_dataset(&dataset, &state, &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "allow_experimental_join");
    }

    #[test]
    fn special_flags_gate_independently() {
        let (dataset, options) = fixture();
        let cloud = FilterState {
            flags: BTreeSet::from([SpecialFlag::Cloud]),
            ..FilterState::default()
        };
        assert_eq!(filter_dataset(&dataset, &cloud, &options).len(), 1);
        let both = FilterState {
            flags: BTreeSet::from([SpecialFlag::Cloud, SpecialFlag::Cited]),
            ..FilterState::default()
        };
        assert!(filter_dataset(&dataset, &both, &options).is_empty());
    }

    #[test]
    fn changed_only_uses_selected_version() {
        let (dataset, options) = fixture();
        let state = FilterState {
            changed_only: true,
            ..FilterState::default()
        };
        let result = filter_dataset(&dataset, &state, &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "max_threads");
    }

    #[test]
    fn ignoring_a_dimension_lifts_only_that_restriction() {
        let (dataset, options) = fixture();
        let state = FilterState {
            tiers: BTreeSet::from([Tier::Beta]),
            query: "join".to_string(),
            ..FilterState::default()
        };
        let criteria = Criteria::new(&state, &options);
        assert!(criteria.apply(&dataset).is_empty());
        let lifted = criteria.ignoring(Dimension::Tier).apply(&dataset);
        assert_eq!(lifted.len(), 1);
        assert_eq!(lifted[0].name, "allow_experimental_join");
    }

    #[test]
    fn summary_line() {
        assert_eq!(
            Summary { visible: 0, total: 1 }.to_string(),
            "Showing 0 of 1 setting"
        );
        assert_eq!(
            Summary { visible: 2, total: 10 }.to_string(),
            "Showing 2 of 10 settings"
        );
    }
}
