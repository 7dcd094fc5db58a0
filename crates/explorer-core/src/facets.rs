//! Facet index: option sets, per-option counts and selection preservation.

use std::collections::{BTreeMap, BTreeSet};

use explorer_model::{Dataset, Scope, Setting, SpecialFlag, Tier};
use tracing::debug;

use crate::filter::{Criteria, Dimension, FilterState};

/// Selectable values of every facet for the current dataset slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    /// Version the tier options were derived for (explicit or newest).
    pub version: Option<String>,
    /// Known versions, oldest first.
    pub versions: Vec<String>,
    pub scopes: Vec<Scope>,
    pub topics: Vec<String>,
    pub tiers: Vec<Tier>,
    pub flags: Vec<SpecialFlag>,
}

impl FacetOptions {
    /// Derive options from the records of `scopes` (all scopes when empty).
    ///
    /// Tiers are those carried by records defined for `version`, falling back
    /// to the newest version when `version` is `None`.
    pub fn derive(dataset: &Dataset, scopes: &BTreeSet<Scope>, version: Option<&str>) -> Self {
        let version = version
            .or_else(|| dataset.latest_version())
            .map(str::to_string);
        let mut topics = BTreeSet::new();
        let mut tiers = BTreeSet::new();
        for (_, setting) in dataset
            .iter()
            .filter(|(scope, _)| scopes.is_empty() || scopes.contains(scope))
        {
            topics.extend(setting.topics().map(str::to_string));
            match version.as_deref() {
                Some(version) if setting.version_info(version).is_some() => {
                    tiers.insert(setting.effective_tier(version));
                }
                Some(_) => {}
                None => {
                    tiers.insert(Tier::from_flags(&setting.flags));
                }
            }
        }
        let mut topics: Vec<String> = topics.into_iter().collect();
        topics.sort_by_key(|topic| topic.to_lowercase());
        Self {
            version,
            versions: dataset.versions.clone(),
            scopes: Scope::all().to_vec(),
            topics,
            tiers: tiers.into_iter().collect(),
            flags: SpecialFlag::all().to_vec(),
        }
    }

    pub fn full_scopes(&self) -> BTreeSet<Scope> {
        self.scopes.iter().copied().collect()
    }

    pub fn full_topics(&self) -> BTreeSet<String> {
        self.topics.iter().cloned().collect()
    }

    pub fn full_tiers(&self) -> BTreeSet<Tier> {
        self.tiers.iter().copied().collect()
    }
}

/// Per-option counts for every facet family.
///
/// Each family is counted with its own restriction suppressed, so a count
/// tells how many records would be visible if that option were selected
/// alongside every other active filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetCounts {
    pub scopes: BTreeMap<Scope, usize>,
    pub topics: BTreeMap<String, usize>,
    pub tiers: BTreeMap<Tier, usize>,
    pub flags: BTreeMap<SpecialFlag, usize>,
    /// Records passing every filter.
    pub visible: usize,
    /// Records in the dataset.
    pub total: usize,
}

/// Recompute every facet count for `state`. O(records × facets).
pub fn compute_counts(
    dataset: &Dataset,
    state: &FilterState,
    options: &FacetOptions,
) -> FacetCounts {
    let criteria = Criteria::new(state, options);
    let mut counts = FacetCounts {
        scopes: options.scopes.iter().map(|scope| (*scope, 0)).collect(),
        topics: options.topics.iter().map(|topic| (topic.clone(), 0)).collect(),
        tiers: options.tiers.iter().map(|tier| (*tier, 0)).collect(),
        flags: options.flags.iter().map(|flag| (*flag, 0)).collect(),
        visible: 0,
        total: dataset.len(),
    };

    let scope_free = criteria.ignoring(Dimension::Scope);
    for (scope, _) in dataset.iter().filter(|(_, s)| scope_free.matches(s)) {
        *counts.scopes.entry(scope).or_default() += 1;
    }

    for setting in matching(dataset, &criteria.ignoring(Dimension::Topic)) {
        for topic in setting.topics() {
            *counts.topics.entry(topic.to_string()).or_default() += 1;
        }
    }

    let tier_free = criteria.ignoring(Dimension::Tier);
    if let Some(version) = tier_free.version() {
        for setting in matching(dataset, &tier_free) {
            *counts.tiers.entry(setting.effective_tier(version)).or_default() += 1;
        }
    }

    for setting in matching(dataset, &criteria.ignoring(Dimension::Flag)) {
        if setting.cloud_only {
            *counts.flags.entry(SpecialFlag::Cloud).or_default() += 1;
        }
        if setting.has_citations() {
            *counts.flags.entry(SpecialFlag::Cited).or_default() += 1;
        }
    }

    counts.visible = matching(dataset, &criteria).count();
    debug!(
        visible = counts.visible,
        total = counts.total,
        topics = counts.topics.len(),
        "facet counts recomputed"
    );
    counts
}

fn matching<'a>(
    dataset: &'a Dataset,
    criteria: &'a Criteria,
) -> impl Iterator<Item = &'a Setting> + 'a {
    dataset
        .iter()
        .filter(move |(scope, setting)| {
            criteria.includes_scope(*scope) && criteria.matches(setting)
        })
        .map(|(_, setting)| setting)
}

/// Carry a facet selection over to a changed option set.
///
/// - "all" stays "all": a selection equal to the previous full option set
///   becomes the new full option set.
/// - An empty selection stays empty.
/// - Otherwise the selection is intersected with the new options; an empty
///   intersection falls back to all new options.
pub fn reconcile_selection<T>(
    previous: &BTreeSet<T>,
    previous_options: &[T],
    new_options: &[T],
) -> BTreeSet<T>
where
    T: Ord + Clone,
{
    let all_new: BTreeSet<T> = new_options.iter().cloned().collect();
    let all_previous: BTreeSet<T> = previous_options.iter().cloned().collect();
    if *previous == all_previous {
        return all_new;
    }
    if previous.is_empty() {
        return BTreeSet::new();
    }
    let kept: BTreeSet<T> = previous.intersection(&all_new).cloned().collect();
    if kept.is_empty() { all_new } else { kept }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn list(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn all_stays_all_across_wider_universe() {
        let result = reconcile_selection(
            &set(&["a", "b"]),
            &list(&["a", "b"]),
            &list(&["a", "b", "c"]),
        );
        assert_eq!(result, set(&["a", "b", "c"]));
    }

    #[test]
    fn empty_stays_empty() {
        let result = reconcile_selection(&set(&[]), &list(&["a", "b"]), &list(&["a", "c"]));
        assert!(result.is_empty());
    }

    #[test]
    fn partial_selection_is_intersected() {
        let result = reconcile_selection(
            &set(&["a", "b"]),
            &list(&["a", "b", "c"]),
            &list(&["b", "c", "d"]),
        );
        assert_eq!(result, set(&["b"]));
    }

    #[test]
    fn empty_intersection_falls_back_to_all() {
        let result = reconcile_selection(&set(&["a"]), &list(&["a", "b"]), &list(&["c", "d"]));
        assert_eq!(result, set(&["c", "d"]));
    }
}
