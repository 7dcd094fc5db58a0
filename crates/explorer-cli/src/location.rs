//! Page location assembled from the configured page URL, a pasted share
//! link and individual filter flags.

use std::collections::BTreeSet;

use explorer_core::UrlState;
use explorer_model::{Scope, SpecialFlag, Tier};
use url::Url;

/// Filter values given as individual command line flags.
///
/// Empty lists leave the corresponding URL parameter untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOverrides {
    pub query: Option<String>,
    pub version: Option<String>,
    pub scopes: Vec<Scope>,
    pub topics: Vec<String>,
    pub tiers: Vec<Tier>,
    pub flags: Vec<SpecialFlag>,
    pub changed_only: bool,
}

impl FilterOverrides {
    fn apply(&self, state: &mut UrlState) {
        if let Some(query) = &self.query {
            state.query = (!query.is_empty()).then(|| query.clone());
        }
        if let Some(version) = &self.version {
            state.version = Some(version.clone());
        }
        if !self.scopes.is_empty() {
            state.scopes = Some(self.scopes.iter().copied().collect());
        }
        if !self.topics.is_empty() {
            state.topics = Some(self.topics.iter().cloned().collect::<BTreeSet<_>>());
        }
        if !self.tiers.is_empty() {
            state.tiers = Some(self.tiers.iter().copied().collect());
        }
        if !self.flags.is_empty() {
            state.flags = Some(self.flags.iter().copied().collect());
        }
        state.changed_only |= self.changed_only;
    }
}

/// Build the location a session is opened at.
///
/// `shared` may be a full URL (used as-is, including its fragment) or a bare
/// query string such as `?q=threads&tier=beta#s-max-threads`, which is
/// resolved against `page`.
pub fn build_location(page: &Url, shared: Option<&str>, overrides: &FilterOverrides) -> Url {
    let mut location = match shared.map(str::trim).filter(|shared| !shared.is_empty()) {
        Some(shared) => Url::parse(shared).unwrap_or_else(|_| with_query(page, shared)),
        None => page.clone(),
    };
    let mut state = UrlState::parse_url(&location);
    overrides.apply(&mut state);
    let query = state.to_query();
    location.set_query((!query.is_empty()).then_some(query.as_str()));
    location
}

fn with_query(page: &Url, shared: &str) -> Url {
    let (query, fragment) = match shared.split_once('#') {
        Some((query, fragment)) => (query, Some(fragment)),
        None => (shared, None),
    };
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut url = page.clone();
    url.set_query((!query.is_empty()).then_some(query));
    url.set_fragment(fragment.filter(|fragment| !fragment.is_empty()));
    url
}
