//! Multi-select facet controls.
//!
//! Each option of a facet group is an independent toggle:
//! - a plain click flips only that option;
//! - a modified click ("solo") deselects every sibling and selects only the
//!   clicked option.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::facets::FacetOptions;
use crate::filter::FilterState;

/// Facet groups shown as pill controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Scope,
    Topic,
    Tier,
    Flag,
}

impl Facet {
    /// URL parameter and container id of this group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Scope => "scope",
            Facet::Topic => "topic",
            Facet::Tier => "tier",
            Facet::Flag => "flags",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Scope => "Scope",
            Facet::Topic => "Topic",
            Facet::Tier => "Tier",
            Facet::Flag => "Only",
        }
    }

    pub const fn all() -> &'static [Facet] {
        &[Facet::Scope, Facet::Topic, Facet::Tier, Facet::Flag]
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an option was clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickMode {
    /// Flip the clicked option.
    #[default]
    Toggle,
    /// Select only the clicked option.
    Solo,
}

/// Apply one click to a selection set.
pub fn click<T: Ord>(selected: &mut BTreeSet<T>, value: T, mode: ClickMode) {
    match mode {
        ClickMode::Toggle => {
            if !selected.remove(&value) {
                selected.insert(value);
            }
        }
        ClickMode::Solo => {
            selected.clear();
            selected.insert(value);
        }
    }
}

/// Apply a click on `value` of `facet` to `state`.
///
/// Returns false (leaving `state` untouched) when `value` is not one of the
/// facet's current options.
pub fn click_facet(
    state: &mut FilterState,
    options: &FacetOptions,
    facet: Facet,
    value: &str,
    mode: ClickMode,
) -> bool {
    match facet {
        Facet::Scope => click_parsed(&mut state.scopes, &options.scopes, value, mode),
        Facet::Tier => click_parsed(&mut state.tiers, &options.tiers, value, mode),
        Facet::Flag => click_parsed(&mut state.flags, &options.flags, value, mode),
        Facet::Topic => match options.topics.iter().find(|topic| *topic == value) {
            Some(topic) => {
                click(&mut state.topics, topic.clone(), mode);
                true
            }
            None => {
                debug!(value, "ignoring click on unknown topic");
                false
            }
        },
    }
}

fn click_parsed<T>(
    selected: &mut BTreeSet<T>,
    options: &[T],
    value: &str,
    mode: ClickMode,
) -> bool
where
    T: Ord + FromStr,
{
    match value.parse::<T>() {
        Ok(parsed) if options.contains(&parsed) => {
            click(selected, parsed, mode);
            true
        }
        _ => {
            debug!(value, "ignoring click on unknown facet option");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use explorer_model::{Scope, SpecialFlag, Tier};

    use super::*;

    #[test]
    fn plain_click_flips_one_option() {
        let mut selected = BTreeSet::from([1, 2, 3]);
        click(&mut selected, 2, ClickMode::Toggle);
        assert_eq!(selected, BTreeSet::from([1, 3]));
        click(&mut selected, 2, ClickMode::Toggle);
        assert_eq!(selected, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn solo_leaves_exactly_one_option() {
        for prior in [BTreeSet::new(), BTreeSet::from([1]), BTreeSet::from([1, 2, 3, 4])] {
            let mut selected = prior;
            click(&mut selected, 3, ClickMode::Solo);
            assert_eq!(selected, BTreeSet::from([3]));
        }
    }

    fn options() -> FacetOptions {
        FacetOptions {
            scopes: vec![Scope::Session, Scope::Format],
            topics: vec!["Joins".to_string(), "Threads".to_string()],
            tiers: vec![Tier::Production, Tier::Beta],
            flags: SpecialFlag::all().to_vec(),
            ..FacetOptions::default()
        }
    }

    #[test]
    fn unknown_values_are_ignored() {
        let options = options();
        let mut state = FilterState::default();
        assert!(!click_facet(&mut state, &options, Facet::Tier, "stable", ClickMode::Toggle));
        assert!(state.tiers.is_empty());
        assert!(click_facet(&mut state, &options, Facet::Tier, "beta", ClickMode::Solo));
        assert_eq!(state.tiers, BTreeSet::from([Tier::Beta]));
    }

    #[test]
    fn values_outside_the_option_set_are_ignored() {
        let options = options();
        let mut state = FilterState {
            topics: options.full_topics(),
            ..FilterState::default()
        };
        assert!(!click_facet(&mut state, &options, Facet::Topic, "Bogus", ClickMode::Toggle));
        assert_eq!(state.topics, options.full_topics());
        assert!(!click_facet(&mut state, &options, Facet::Tier, "experimental", ClickMode::Solo));
        assert!(!click_facet(&mut state, &options, Facet::Scope, "mergetree", ClickMode::Solo));

        assert!(click_facet(&mut state, &options, Facet::Topic, "Joins", ClickMode::Solo));
        assert_eq!(state.topics, BTreeSet::from(["Joins".to_string()]));
    }
}
