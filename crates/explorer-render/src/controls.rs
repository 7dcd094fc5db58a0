//! Facet pill groups and the search bar.

use std::collections::BTreeSet;

use explorer_core::{Facet, FacetCounts, FacetOptions, FilterState};
use tracing::debug;

use crate::error::Result;
use crate::html::Html;

/// Which control containers exist on the page.
///
/// Rendering a facet group whose container is missing is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    facets: BTreeSet<Facet>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            facets: Facet::all().iter().copied().collect(),
        }
    }
}

impl PageLayout {
    pub fn with_facets(facets: impl IntoIterator<Item = Facet>) -> Self {
        Self {
            facets: facets.into_iter().collect(),
        }
    }

    pub fn without(mut self, facet: Facet) -> Self {
        self.facets.remove(&facet);
        self
    }

    pub fn has(&self, facet: Facet) -> bool {
        self.facets.contains(&facet)
    }
}

struct Pill {
    value: String,
    label: String,
    help: Option<&'static str>,
    count: usize,
    pressed: bool,
}

fn pills(
    facet: Facet,
    state: &FilterState,
    options: &FacetOptions,
    counts: &FacetCounts,
) -> Vec<Pill> {
    match facet {
        Facet::Scope => options
            .scopes
            .iter()
            .map(|scope| Pill {
                value: scope.as_str().to_string(),
                label: scope.label().to_string(),
                help: Some(scope.help()),
                count: counts.scopes.get(scope).copied().unwrap_or_default(),
                pressed: state.scopes.contains(scope),
            })
            .collect(),
        Facet::Topic => options
            .topics
            .iter()
            .map(|topic| Pill {
                value: topic.clone(),
                label: topic.clone(),
                help: None,
                count: counts.topics.get(topic).copied().unwrap_or_default(),
                pressed: state.topics.contains(topic),
            })
            .collect(),
        Facet::Tier => options
            .tiers
            .iter()
            .map(|tier| Pill {
                value: tier.as_str().to_string(),
                label: tier.label().to_string(),
                help: Some(tier.help()),
                count: counts.tiers.get(tier).copied().unwrap_or_default(),
                pressed: state.tiers.contains(tier),
            })
            .collect(),
        Facet::Flag => options
            .flags
            .iter()
            .map(|flag| Pill {
                value: flag.as_str().to_string(),
                label: flag.label().to_string(),
                help: Some(flag.help()),
                count: counts.flags.get(flag).copied().unwrap_or_default(),
                pressed: state.flags.contains(flag),
            })
            .collect(),
    }
}

/// Render one facet group as a fieldset of toggle pills.
///
/// Returns `Ok(None)` when `layout` has no container for `facet`.
pub fn render_facet_group(
    facet: Facet,
    layout: &PageLayout,
    state: &FilterState,
    options: &FacetOptions,
    counts: &FacetCounts,
) -> Result<Option<String>> {
    if !layout.has(facet) {
        debug!(%facet, "facet container missing; skipping");
        return Ok(None);
    }
    let mut html = Html::new();
    write_facet_group(&mut html, facet, state, options, counts)?;
    html.finish().map(Some)
}

pub(crate) fn write_facet_groups(
    html: &mut Html,
    layout: &PageLayout,
    state: &FilterState,
    options: &FacetOptions,
    counts: &FacetCounts,
) -> Result<()> {
    for facet in Facet::all() {
        if layout.has(*facet) {
            write_facet_group(html, *facet, state, options, counts)?;
        } else {
            debug!(%facet, "facet container missing; skipping");
        }
    }
    Ok(())
}

fn write_facet_group(
    html: &mut Html,
    facet: Facet,
    state: &FilterState,
    options: &FacetOptions,
    counts: &FacetCounts,
) -> Result<()> {
    let id = format!("facet-{}", facet.as_str());
    html.open(
        "fieldset",
        &[
            ("class", "facet"),
            ("id", id.as_str()),
            ("data-facet", facet.as_str()),
        ],
    )?;
    html.element("legend", &[], facet.label())?;
    for pill in pills(facet, state, options, counts) {
        let pressed = if pill.pressed { "true" } else { "false" };
        let class = if pill.count == 0 { "pill empty" } else { "pill" };
        let mut attrs = vec![
            ("type", "button"),
            ("class", class),
            ("data-value", pill.value.as_str()),
            ("aria-pressed", pressed),
        ];
        if let Some(help) = pill.help {
            attrs.push(("title", help));
        }
        html.open("button", &attrs)?;
        html.text(&pill.label)?;
        html.text(" ")?;
        html.element("span", &[("class", "count")], &pill.count.to_string())?;
        html.close("button")?;
    }
    html.close("fieldset")
}

/// Search box, version picker and changed-only toggle.
pub(crate) fn write_toolbar(
    html: &mut Html,
    state: &FilterState,
    options: &FacetOptions,
) -> Result<()> {
    html.open("div", &[("class", "toolbar")])?;
    html.void(
        "input",
        &[
            ("type", "search"),
            ("id", "search"),
            ("placeholder", "Search settings (press / to focus)"),
            ("value", state.query.as_str()),
            ("autocomplete", "off"),
        ],
    )?;

    let selected = state.version.as_deref().or(options.version.as_deref());
    html.open("select", &[("id", "version"), ("title", "Version")])?;
    for version in options.versions.iter().rev() {
        let mut attrs = vec![("value", version.as_str())];
        if selected == Some(version.as_str()) {
            attrs.push(("selected", "selected"));
        }
        html.element("option", &attrs, version)?;
    }
    html.close("select")?;

    html.open("label", &[("class", "changed-only")])?;
    let mut attrs = vec![("type", "checkbox"), ("id", "changed-only")];
    if state.changed_only {
        attrs.push(("checked", "checked"));
    }
    html.void("input", &attrs)?;
    html.text(" Changed in this version")?;
    html.close("label")?;
    html.close("div")
}

#[cfg(test)]
mod tests {
    use explorer_model::Tier;

    use super::*;

    #[test]
    fn missing_container_renders_nothing() {
        let layout = PageLayout::default().without(Facet::Topic);
        let rendered = render_facet_group(
            Facet::Topic,
            &layout,
            &FilterState::default(),
            &FacetOptions::default(),
            &FacetCounts::default(),
        )
        .unwrap();
        assert_eq!(rendered, None);
    }

    #[test]
    fn tier_pills_carry_help_counts_and_state() {
        let options = FacetOptions {
            tiers: vec![Tier::Production, Tier::Beta],
            ..FacetOptions::default()
        };
        let state = FilterState {
            tiers: BTreeSet::from([Tier::Beta]),
            ..FilterState::default()
        };
        let counts = FacetCounts {
            tiers: [(Tier::Production, 4), (Tier::Beta, 1)].into_iter().collect(),
            ..FacetCounts::default()
        };
        let layout = PageLayout::default();
        let html = render_facet_group(Facet::Tier, &layout, &state, &options, &counts)
            .unwrap()
            .unwrap();
        assert!(html.starts_with(
            "<fieldset class=\"facet\" id=\"facet-tier\" data-facet=\"tier\">"
        ));
        assert!(html.contains("data-value=\"beta\" aria-pressed=\"true\" title=\""));
        assert!(html.contains("data-value=\"production\" aria-pressed=\"false\""));
        assert!(html.contains("Beta <span class=\"count\">1</span>"));
    }
}
