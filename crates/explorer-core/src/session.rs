//! Explorer session: the application state machine.
//!
//! The session owns the dataset, the [`FilterState`] and everything derived
//! from them. Front-ends feed it [`UiEvent`]s together with the current time
//! and act on the returned [`Effects`]. Nothing here touches a display; the
//! rendered page is always a projection of the session.

use std::time::Instant;

use explorer_model::{Dataset, Scope, Setting};
use tracing::{debug, info, warn};
use url::Url;

use crate::anchor::{deep_link, find_anchor, normalize_fragment, setting_anchor};
use crate::config::{ExplorerConfig, Theme};
use crate::controls::{ClickMode, Facet, click_facet};
use crate::debounce::SearchCadences;
use crate::facets::{FacetCounts, FacetOptions, compute_counts, reconcile_selection};
use crate::filter::{Criteria, FilterState, Summary};
use crate::shortcuts::{KeyPress, Shortcut, shortcut_for};
use crate::url_state::{UrlState, UrlSync};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    FacetClick {
        facet: Facet,
        value: String,
        mode: ClickMode,
    },
    /// New contents of the search box.
    QueryInput(String),
    ChangedOnly(bool),
    SelectVersion(String),
    /// The location fragment changed (with or without `#`).
    HashChange(String),
    Key(KeyPress),
    /// Timer wake-up; fires any elapsed debounce deadline.
    Tick,
}

/// What the front-end has to do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub rerender_list: bool,
    pub refresh_counts: bool,
    /// Facet option sets changed; pill groups must be rebuilt.
    pub rebuild_controls: bool,
    /// Replace the current history entry with this URL.
    pub replace_url: Option<Url>,
    /// Scroll to and highlight the row with this anchor.
    pub scroll_to: Option<String>,
    pub focus_search: bool,
    /// Theme changed; apply and persist it.
    pub theme: Option<Theme>,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        *self == Effects::default()
    }

    fn everything() -> Self {
        Self {
            rerender_list: true,
            refresh_counts: true,
            rebuild_controls: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Highlight {
    anchor: String,
    until: Instant,
}

#[derive(Debug, Clone)]
pub struct ExplorerSession {
    config: ExplorerConfig,
    dataset: Option<Dataset>,
    state: FilterState,
    options: FacetOptions,
    counts: FacetCounts,
    /// Visible rows as (scope, index within that scope's collection).
    visible: Vec<(Scope, usize)>,
    /// URL state waiting for facet options to exist.
    pending: Option<UrlState>,
    url: UrlSync,
    cadences: SearchCadences,
    theme: Theme,
    highlight: Option<Highlight>,
}

impl ExplorerSession {
    /// Open a session at `location`.
    ///
    /// The URL is parsed immediately so the search box can be pre-filled
    /// while the dataset is still loading; the rest is applied by
    /// [`ExplorerSession::attach_dataset`].
    pub fn open(config: ExplorerConfig, location: Url) -> Self {
        let pending = UrlState::parse_url(&location);
        let mut state = FilterState::default();
        pending.apply_prefill(&mut state);
        let cadences = config.timing.cadences();
        let theme = Theme::from_dark_mode(config.general.dark_mode);
        Self {
            config,
            dataset: None,
            state,
            options: FacetOptions::default(),
            counts: FacetCounts::default(),
            visible: Vec::new(),
            pending: Some(pending),
            url: UrlSync::new(location),
            cadences,
            theme,
            highlight: None,
        }
    }

    /// Install the loaded dataset, apply the pending URL state and compute
    /// the first list, counts and canonical URL.
    pub fn attach_dataset(&mut self, dataset: Dataset, now: Instant) -> Effects {
        let pending = self.pending.take().unwrap_or_default();
        let scopes = pending.scopes.clone().unwrap_or_default();
        let version = pending
            .version
            .as_deref()
            .filter(|version| dataset.has_version(version));
        self.options = FacetOptions::derive(&dataset, &scopes, version);
        pending.apply(&mut self.state, &self.options);
        self.dataset = Some(dataset);
        info!(
            records = self.dataset.as_ref().map_or(0, Dataset::len),
            version = self.options.version.as_deref().unwrap_or("none"),
            "session ready"
        );

        self.recompute_list();
        self.recompute_counts();
        let mut effects = Effects::everything();
        effects.replace_url = self.sync_url();
        if let Some(fragment) = self.url.current().fragment().map(str::to_string) {
            effects.scroll_to = self.navigate(&fragment, now);
        }
        effects
    }

    pub fn handle(&mut self, event: UiEvent, now: Instant) -> Effects {
        match event {
            UiEvent::FacetClick { facet, value, mode } => self.on_facet_click(facet, &value, mode),
            UiEvent::QueryInput(query) => {
                if query != self.state.query {
                    self.state.query = query;
                    self.cadences.schedule(now);
                }
                Effects::default()
            }
            UiEvent::ChangedOnly(enabled) => {
                if enabled == self.state.changed_only {
                    return Effects::default();
                }
                self.state.changed_only = enabled;
                self.refilter()
            }
            UiEvent::SelectVersion(version) => self.on_select_version(version),
            UiEvent::HashChange(fragment) => {
                let anchor = normalize_fragment(&fragment);
                self.url.track_fragment((!anchor.is_empty()).then_some(anchor));
                Effects {
                    scroll_to: self.navigate(&fragment, now),
                    ..Effects::default()
                }
            }
            UiEvent::Key(press) => match shortcut_for(&press) {
                Some(shortcut) => self.on_shortcut(shortcut),
                None => Effects::default(),
            },
            UiEvent::Tick => self.on_tick(now),
        }
    }

    fn on_facet_click(&mut self, facet: Facet, value: &str, mode: ClickMode) -> Effects {
        if self.dataset.is_none() {
            debug!(%facet, value, "ignoring facet click before dataset load");
            return Effects::default();
        }
        if !click_facet(&mut self.state, &self.options, facet, value, mode) {
            return Effects::default();
        }
        let rebuilt = facet == Facet::Scope && self.refresh_options();
        let mut effects = self.refilter();
        effects.rebuild_controls = rebuilt;
        effects
    }

    fn on_select_version(&mut self, version: String) -> Effects {
        let Some(dataset) = &self.dataset else {
            return Effects::default();
        };
        if !dataset.has_version(&version) {
            warn!(%version, "ignoring unknown version");
            return Effects::default();
        }
        if self.state.version.as_deref() == Some(version.as_str()) {
            return Effects::default();
        }
        self.state.version = Some(version);
        let rebuilt = self.refresh_options();
        let mut effects = self.refilter();
        effects.rebuild_controls = rebuilt;
        effects
    }

    fn on_shortcut(&mut self, shortcut: Shortcut) -> Effects {
        match shortcut {
            Shortcut::FocusSearch => Effects {
                focus_search: true,
                ..Effects::default()
            },
            Shortcut::ClearSearch => {
                self.cadences.cancel();
                if self.state.query.is_empty() {
                    return Effects::default();
                }
                self.state.query.clear();
                self.refilter()
            }
            Shortcut::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.config.general.dark_mode = self.theme.is_dark();
                debug!(theme = self.theme.as_str(), "theme toggled");
                Effects {
                    theme: Some(self.theme),
                    ..Effects::default()
                }
            }
        }
    }

    fn on_tick(&mut self, now: Instant) -> Effects {
        let mut effects = Effects::default();
        if self.cadences.list.fire(now) {
            self.recompute_list();
            effects.rerender_list = true;
            effects.replace_url = self.sync_url();
        }
        if self.cadences.counts.fire(now) {
            self.recompute_counts();
            effects.refresh_counts = true;
        }
        if self
            .highlight
            .as_ref()
            .is_some_and(|highlight| highlight.until <= now)
        {
            self.highlight = None;
        }
        effects
    }

    /// Recompute list and counts right away and mirror the state into the URL.
    fn refilter(&mut self) -> Effects {
        self.recompute_list();
        self.recompute_counts();
        Effects {
            rerender_list: true,
            refresh_counts: true,
            replace_url: self.sync_url(),
            ..Effects::default()
        }
    }

    /// Re-derive facet options after a scope or version change, carrying the
    /// topic and tier selections over. Returns true if the options changed.
    fn refresh_options(&mut self) -> bool {
        let Some(dataset) = &self.dataset else {
            return false;
        };
        let next = FacetOptions::derive(dataset, &self.state.scopes, self.state.version.as_deref());
        if next == self.options {
            return false;
        }
        self.state.topics =
            reconcile_selection(&self.state.topics, &self.options.topics, &next.topics);
        self.state.tiers = reconcile_selection(&self.state.tiers, &self.options.tiers, &next.tiers);
        self.options = next;
        true
    }

    fn recompute_list(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.visible.clear();
            return;
        };
        let criteria = Criteria::new(&self.state, &self.options);
        let mut visible = Vec::new();
        for scope in Scope::all() {
            if !criteria.includes_scope(*scope) {
                continue;
            }
            for (index, setting) in dataset.scope(*scope).iter().enumerate() {
                if criteria.matches(setting) {
                    visible.push((*scope, index));
                }
            }
        }
        debug!(visible = visible.len(), query = %self.state.query, "list recomputed");
        self.visible = visible;
    }

    fn recompute_counts(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.counts = compute_counts(dataset, &self.state, &self.options);
        }
    }

    fn sync_url(&mut self) -> Option<Url> {
        let query = UrlState::from_state(&self.state, &self.options).to_query();
        self.url.replace_query(&query)
    }

    /// Highlight the visible row whose anchor is `fragment`, if any.
    fn navigate(&mut self, fragment: &str, now: Instant) -> Option<String> {
        let anchor = normalize_fragment(fragment);
        find_anchor(self.visible_settings(), anchor)?;
        self.highlight = Some(Highlight {
            anchor: anchor.to_string(),
            until: now + self.config.timing.highlight(),
        });
        Some(anchor.to_string())
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn counts(&self) -> &FacetCounts {
        &self.counts
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn current_url(&self) -> &Url {
        self.url.current()
    }

    /// Earliest pending debounce deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.cadences.next_deadline()
    }

    /// Visible records in display order.
    pub fn visible_settings(&self) -> impl Iterator<Item = &Setting> + '_ {
        self.visible.iter().filter_map(|(scope, index)| {
            self.dataset
                .as_ref()
                .and_then(|dataset| dataset.scope(*scope).get(*index))
        })
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            visible: self.visible.len(),
            total: self.dataset.as_ref().map_or(0, Dataset::len),
        }
    }

    /// Anchor of the highlighted row, while the highlight lasts.
    pub fn highlighted(&self, now: Instant) -> Option<&str> {
        self.highlight
            .as_ref()
            .filter(|highlight| highlight.until > now)
            .map(|highlight| highlight.anchor.as_str())
    }

    /// Shareable link to `setting` from the current page URL.
    pub fn link_for(&self, setting: &Setting) -> Url {
        deep_link(self.url.current(), &setting_anchor(setting))
    }
}
