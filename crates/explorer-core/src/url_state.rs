//! URL state synchronization.
//!
//! Filter state is mirrored into the page URL query so that any view can be
//! shared. Parameters:
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `q`       | free-text query |
//! | `v`       | selected version |
//! | `scope`   | comma-separated scopes |
//! | `topic`   | comma-separated topics |
//! | `tier`    | comma-separated tiers |
//! | `flags`   | comma-separated special flags |
//! | `changed` | `1` when only changed settings are shown |
//!
//! An absent facet parameter means "all options"; a present but empty one
//! means "none". Unknown parameters and unparsable values are ignored.

use std::collections::BTreeSet;
use std::str::FromStr;

use explorer_model::{Scope, SpecialFlag, Tier};
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::facets::FacetOptions;
use crate::filter::FilterState;

pub const PARAM_QUERY: &str = "q";
pub const PARAM_VERSION: &str = "v";
pub const PARAM_SCOPE: &str = "scope";
pub const PARAM_TOPIC: &str = "topic";
pub const PARAM_TIER: &str = "tier";
pub const PARAM_FLAGS: &str = "flags";
pub const PARAM_CHANGED: &str = "changed";

const LIST_SEPARATOR: char = ',';

/// Filter state as carried by a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pub query: Option<String>,
    pub version: Option<String>,
    /// `None` when the parameter is absent ("all").
    pub scopes: Option<BTreeSet<Scope>>,
    pub topics: Option<BTreeSet<String>>,
    pub tiers: Option<BTreeSet<Tier>>,
    pub flags: Option<BTreeSet<SpecialFlag>>,
    pub changed_only: bool,
}

impl UrlState {
    /// Parse a raw query string, with or without the leading `?`.
    pub fn parse_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PARAM_QUERY => state.query = Some(value.into_owned()),
                PARAM_VERSION => {
                    let version = value.trim();
                    if !version.is_empty() {
                        state.version = Some(version.to_string());
                    }
                }
                PARAM_SCOPE => state.scopes = parse_list(&value).or(state.scopes),
                PARAM_TOPIC => {
                    state.topics = Some(split_list(&value).map(str::to_string).collect());
                }
                PARAM_TIER => state.tiers = parse_list(&value).or(state.tiers),
                PARAM_FLAGS => state.flags = parse_list(&value).or(state.flags),
                PARAM_CHANGED => match value.trim().to_ascii_lowercase().as_str() {
                    "" | "1" | "true" | "yes" => state.changed_only = true,
                    "0" | "false" | "no" => state.changed_only = false,
                    other => debug!(value = other, "ignoring malformed changed flag"),
                },
                other => debug!(param = other, "ignoring unknown url parameter"),
            }
        }
        state
    }

    /// Parse the query component of a full URL.
    pub fn parse_url(url: &Url) -> Self {
        Self::parse_query(url.query().unwrap_or_default())
    }

    /// Parse either a full URL or a bare query string.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) => Self::parse_url(&url),
            Err(_) => Self::parse_query(input),
        }
    }

    /// Capture `state`, omitting facets whose selection is the full option set.
    pub fn from_state(state: &FilterState, options: &FacetOptions) -> Self {
        Self {
            query: (!state.query.is_empty()).then(|| state.query.clone()),
            version: state.version.clone(),
            scopes: (state.scopes != options.full_scopes()).then(|| state.scopes.clone()),
            topics: (state.topics != options.full_topics()).then(|| state.topics.clone()),
            tiers: (state.tiers != options.full_tiers()).then(|| state.tiers.clone()),
            flags: (!state.flags.is_empty()).then(|| state.flags.clone()),
            changed_only: state.changed_only,
        }
    }

    /// Encode as a query string (no leading `?`). Parameter order is fixed.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(query) = &self.query {
            serializer.append_pair(PARAM_QUERY, query);
        }
        if let Some(version) = &self.version {
            serializer.append_pair(PARAM_VERSION, version);
        }
        if let Some(scopes) = &self.scopes {
            serializer.append_pair(PARAM_SCOPE, &join_list(scopes.iter().map(Scope::as_str)));
        }
        if let Some(topics) = &self.topics {
            serializer.append_pair(PARAM_TOPIC, &join_list(topics.iter().map(String::as_str)));
        }
        if let Some(tiers) = &self.tiers {
            serializer.append_pair(PARAM_TIER, &join_list(tiers.iter().map(Tier::as_str)));
        }
        if let Some(flags) = &self.flags {
            serializer.append_pair(PARAM_FLAGS, &join_list(flags.iter().map(SpecialFlag::as_str)));
        }
        if self.changed_only {
            serializer.append_pair(PARAM_CHANGED, "1");
        }
        serializer.finish()
    }

    /// Apply the parts that are meaningful before the dataset is loaded.
    pub fn apply_prefill(&self, state: &mut FilterState) {
        if let Some(query) = &self.query {
            state.query = query.clone();
        }
        state.changed_only = self.changed_only;
        if let Some(scopes) = &self.scopes {
            state.scopes = scopes.clone();
        }
    }

    /// Apply everything to `state`, validated against `options`.
    ///
    /// `options` must have been derived for the scopes this URL selects.
    /// Unknown versions and topics/tiers outside the options are ignored; a
    /// list whose every value is unknown counts as absent.
    pub fn apply(&self, state: &mut FilterState, options: &FacetOptions) {
        self.apply_prefill(state);
        state.scopes = self.scopes.clone().unwrap_or_else(|| options.full_scopes());
        match &self.version {
            Some(version) if options.versions.contains(version) => {
                state.version = Some(version.clone());
            }
            Some(version) => debug!(%version, "ignoring unknown version in url"),
            None => {}
        }
        state.topics = restrict(self.topics.as_ref(), &options.full_topics());
        state.tiers = restrict(self.tiers.as_ref(), &options.full_tiers());
        state.flags = self.flags.clone().unwrap_or_default();
    }
}

fn restrict<T: Ord + Clone>(requested: Option<&BTreeSet<T>>, full: &BTreeSet<T>) -> BTreeSet<T> {
    match requested {
        None => full.clone(),
        Some(requested) if requested.is_empty() => BTreeSet::new(),
        Some(requested) => {
            let known: BTreeSet<T> = requested.intersection(full).cloned().collect();
            if known.is_empty() { full.clone() } else { known }
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Parse a typed list. An empty value is an explicit empty selection; a
/// value with no parsable item is treated as absent.
fn parse_list<T: Ord + FromStr>(value: &str) -> Option<BTreeSet<T>> {
    if value.trim().is_empty() {
        return Some(BTreeSet::new());
    }
    let parsed: BTreeSet<T> = split_list(value)
        .filter_map(|item| item.parse().ok())
        .collect();
    if parsed.is_empty() {
        debug!(value, "ignoring malformed url list");
        None
    } else {
        Some(parsed)
    }
}

fn join_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(",")
}

/// Keeps the page URL in step with filter state.
///
/// Changes are written as history *replacements*, and only when the URL
/// actually differs, so repeated identical states never churn history.
#[derive(Debug, Clone)]
pub struct UrlSync {
    current: Url,
}

impl UrlSync {
    pub fn new(current: Url) -> Self {
        Self { current }
    }

    pub fn current(&self) -> &Url {
        &self.current
    }

    /// Replace the query component. Returns the new URL if it changed.
    pub fn replace_query(&mut self, query: &str) -> Option<Url> {
        let mut next = self.current.clone();
        next.set_query((!query.is_empty()).then_some(query));
        self.replace(next)
    }

    /// Record a fragment the browser already shows; nothing to replace.
    pub fn track_fragment(&mut self, fragment: Option<&str>) {
        self.current.set_fragment(fragment);
    }

    fn replace(&mut self, next: Url) -> Option<Url> {
        if next == self.current {
            return None;
        }
        debug!(url = %next, "replacing history entry");
        self.current = next.clone();
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_malformed_parameters_are_ignored() {
        let state = UrlState::parse_query("?utm_source=x&tier=stable,beta&scope=nope&changed=maybe");
        assert_eq!(state.tiers, Some(BTreeSet::from([Tier::Beta])));
        assert_eq!(state.scopes, None);
        assert!(!state.changed_only);
    }

    #[test]
    fn empty_list_means_none_selected() {
        let state = UrlState::parse_query("topic=&tier=");
        assert_eq!(state.topics, Some(BTreeSet::new()));
        assert_eq!(state.tiers, Some(BTreeSet::new()));
        assert_eq!(state.scopes, None);
    }

    #[test]
    fn encodes_in_fixed_order() {
        let state = UrlState {
            query: Some("max threads".to_string()),
            version: Some("25.8".to_string()),
            scopes: Some(BTreeSet::from([Scope::Format, Scope::Session])),
            changed_only: true,
            ..UrlState::default()
        };
        insta::assert_snapshot!(state.to_query(), @"q=max+threads&v=25.8&scope=session%2Cformat&changed=1");
    }

    #[test]
    fn parses_full_urls_and_bare_queries() {
        let from_url = UrlState::parse("https://example.com/explorer/?q=join&v=25.8#s-join");
        let from_query = UrlState::parse("q=join&v=25.8");
        assert_eq!(from_url, from_query);
        assert_eq!(from_url.query.as_deref(), Some("join"));
    }

    #[test]
    fn url_sync_only_reports_real_changes() {
        let mut sync = UrlSync::new(Url::parse("https://example.com/explorer/").unwrap());
        assert_eq!(sync.replace_query(""), None);
        let replaced = sync.replace_query("q=join").unwrap();
        assert_eq!(replaced.as_str(), "https://example.com/explorer/?q=join");
        assert_eq!(sync.replace_query("q=join"), None);
        assert!(sync.replace_query("").is_some());
        assert_eq!(sync.current().as_str(), "https://example.com/explorer/");
    }
}
