//! Filtering, facet counting and URL-state engine for the settings explorer.
//!
//! The crate has no display dependency. [`loader`] produces an annotated
//! [`explorer_model::Dataset`]; [`filter`] and [`facets`] are pure functions
//! over it; [`session::ExplorerSession`] ties them together as the state
//! machine a front-end drives.

pub mod anchor;
pub mod clipboard;
pub mod config;
pub mod controls;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod filter;
pub mod loader;
pub mod search;
pub mod session;
pub mod shortcuts;
pub mod topics;
pub mod url_state;

pub use anchor::{anchor_id, deep_link, find_anchor, sanitize_anchor, setting_anchor};
pub use clipboard::{ClipboardBackend, CopyOutcome, copy_with_fallback};
pub use config::{DisplayConfig, ExplorerConfig, GeneralConfig, Theme, TimingConfig};
pub use controls::{ClickMode, Facet, click, click_facet};
pub use debounce::{Debouncer, SearchCadences};
pub use error::{ClipboardError, ConfigError, LoadError, Result};
pub use facets::{FacetCounts, FacetOptions, compute_counts, reconcile_selection};
pub use filter::{Criteria, Dimension, FilterState, Summary, filter_dataset, passes_filter};
pub use loader::{annotate, load_dataset, load_dataset_from_reader, parse_dataset};
pub use search::{matches_all, tokenize};
pub use session::{Effects, ExplorerSession, UiEvent};
pub use shortcuts::{KeyPress, Shortcut, shortcut_for};
pub use topics::{TopicRule, TopicRules};
pub use url_state::{UrlState, UrlSync};
