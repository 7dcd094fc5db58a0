//! One result row.

use explorer_core::anchor::{anchor_id, deep_link, setting_anchor};
use explorer_model::{Dataset, RelatedSetting, Setting, SpecialFlag, Tier};
use url::Url;

use crate::error::Result;
use crate::html::Html;

const ELLIPSIS: char = '…';

/// Everything a row needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// Version whose default and tier are shown.
    pub version: Option<&'a str>,
    /// Current page URL; copy-link targets are built from it.
    pub page_url: &'a Url,
    pub preview_chars: usize,
    /// Anchor of the row currently highlighted by hash navigation.
    pub highlighted: Option<&'a str>,
    /// Used to resolve related settings that live in another scope.
    pub dataset: Option<&'a Dataset>,
}

/// Shorten `text` to at most `max_chars` characters (plus an ellipsis),
/// cutting at the last word boundary when there is one.
pub fn truncate_preview(text: &str, max_chars: usize) -> Option<String> {
    if text.chars().count() <= max_chars {
        return None;
    }
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(index, _)| index);
    let head = &text[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };
    let mut preview = head.trim_end().to_string();
    preview.push(ELLIPSIS);
    Some(preview)
}

pub fn render_row(setting: &Setting, ctx: &RowContext<'_>) -> Result<String> {
    let mut html = Html::new();
    write_row(&mut html, setting, ctx)?;
    html.finish()
}

pub(crate) fn write_row(html: &mut Html, setting: &Setting, ctx: &RowContext<'_>) -> Result<()> {
    let anchor = setting_anchor(setting);
    let class = if ctx.highlighted == Some(anchor.as_str()) {
        "setting highlight"
    } else {
        "setting"
    };
    html.open(
        "article",
        &[
            ("class", class),
            ("id", anchor.as_str()),
            ("data-scope", setting.scope().as_str()),
        ],
    )?;

    html.open("header", &[("class", "setting-head")])?;
    html.open("h3", &[("class", "setting-name")])?;
    let self_link = format!("#{anchor}");
    html.element(
        "a",
        &[("class", "anchor"), ("href", self_link.as_str())],
        &setting.name,
    )?;
    html.close("h3")?;
    write_chips(html, setting, ctx.version)?;
    html.close("header")?;

    write_default(html, setting, ctx.version)?;
    write_description(html, &setting.description, ctx.preview_chars)?;
    write_history(html, setting)?;
    write_related(html, setting, ctx.dataset)?;
    write_citations(html, setting)?;

    html.open("footer", &[("class", "setting-links")])?;
    let docs = setting.docs_url();
    html.element(
        "a",
        &[
            ("class", "docs"),
            ("href", docs.as_str()),
            ("target", "_blank"),
            ("rel", "noopener"),
        ],
        "Docs",
    )?;
    let link = deep_link(ctx.page_url, &anchor);
    html.element(
        "button",
        &[
            ("type", "button"),
            ("class", "copy-link"),
            ("data-link", link.as_str()),
            ("title", "Copy a link to this setting"),
        ],
        "Copy link",
    )?;
    html.close("footer")?;

    html.close("article")
}

fn write_chips(html: &mut Html, setting: &Setting, version: Option<&str>) -> Result<()> {
    html.open("div", &[("class", "chips")])?;
    if !setting.setting_type.is_empty() {
        html.element(
            "span",
            &[("class", "chip chip-type"), ("title", "Type")],
            &setting.setting_type,
        )?;
    }
    for topic in setting.topics() {
        html.element("span", &[("class", "chip chip-topic")], topic)?;
    }
    let scope = setting.scope();
    html.element(
        "span",
        &[("class", "chip chip-scope"), ("title", scope.help())],
        scope.label(),
    )?;

    let tier = match version {
        Some(version) => setting.effective_tier(version),
        None => Tier::from_flags(&setting.flags),
    };
    if tier != Tier::Production {
        let class = format!("badge badge-tier badge-{}", tier.as_str());
        html.element(
            "span",
            &[("class", class.as_str()), ("title", tier.help())],
            tier.label(),
        )?;
    }
    if setting.cloud_only {
        html.element(
            "span",
            &[
                ("class", "badge badge-cloud"),
                ("title", "Only has an effect in the cloud service"),
            ],
            SpecialFlag::Cloud.label(),
        )?;
    }
    if setting.is_important(version) {
        html.element(
            "span",
            &[
                ("class", "badge badge-important"),
                ("title", "Marked important upstream"),
            ],
            "Important",
        )?;
    }
    if let Some(alias) = setting.alias.as_deref().filter(|alias| !alias.is_empty()) {
        html.element(
            "span",
            &[("class", "chip chip-alias"), ("title", "Alias")],
            &format!("alias: {alias}"),
        )?;
    }
    html.close("div")
}

fn write_default(html: &mut Html, setting: &Setting, version: Option<&str>) -> Result<()> {
    let Some((version, info)) =
        version.and_then(|version| Some((version, setting.version_info(version)?)))
    else {
        return Ok(());
    };
    html.open("p", &[("class", "default")])?;
    html.text(&format!("Default in {version}: "))?;
    html.element("code", &[], &info.default)?;
    if info.changed_from_prev {
        html.element(
            "span",
            &[
                ("class", "badge badge-changed"),
                ("title", "Default changed since the previous version"),
            ],
            "changed",
        )?;
    }
    html.close("p")
}

fn write_description(html: &mut Html, description: &str, preview_chars: usize) -> Result<()> {
    let description = description.trim();
    if description.is_empty() {
        return Ok(());
    }
    match truncate_preview(description, preview_chars) {
        None => html.element("p", &[("class", "description")], description),
        Some(preview) => {
            html.open("details", &[("class", "description")])?;
            html.element("summary", &[], &preview)?;
            html.element("p", &[], description)?;
            html.close("details")
        }
    }
}

fn write_history(html: &mut Html, setting: &Setting) -> Result<()> {
    if setting.versions.is_empty() && setting.history.is_empty() {
        return Ok(());
    }
    html.open("details", &[("class", "history")])?;
    html.element("summary", &[], "Version history")?;

    if !setting.versions.is_empty() {
        html.open("table", &[("class", "versions")])?;
        html.open("tr", &[])?;
        for heading in ["Version", "Default", "Tier"] {
            html.element("th", &[], heading)?;
        }
        html.close("tr")?;
        let mut versions: Vec<_> = setting.versions.iter().collect();
        versions.sort_by_key(|(version, _)| version_key(version));
        for (version, info) in versions {
            let attrs: &[(&str, &str)] = if info.changed_from_prev {
                &[("class", "changed")]
            } else {
                &[]
            };
            html.open("tr", attrs)?;
            html.element("td", &[], version)?;
            html.open("td", &[])?;
            html.element("code", &[], &info.default)?;
            html.close("td")?;
            let tier = info.tier.map_or("", |tier| tier.label());
            html.element("td", &[], tier)?;
            html.close("tr")?;
        }
        html.close("table")?;
    }

    if !setting.history.is_empty() {
        html.open("ul", &[("class", "default-changes")])?;
        for entry in &setting.history {
            html.open("li", &[])?;
            html.element("strong", &[], &entry.version_minor)?;
            html.text(" ")?;
            html.element("code", &[], &entry.new_default)?;
            if !entry.comment.is_empty() {
                html.text(&format!(" {}", entry.comment))?;
            }
            html.close("li")?;
        }
        html.close("ul")?;
    }

    let lifetime = match (&setting.introduced_in, &setting.removed_in) {
        (Some(introduced), Some(removed)) => {
            Some(format!("Introduced in {introduced}, removed in {removed}"))
        }
        (Some(introduced), None) => Some(format!("Introduced in {introduced}")),
        (None, Some(removed)) => Some(format!("Removed in {removed}")),
        (None, None) => None,
    };
    if let Some(lifetime) = lifetime {
        html.element("p", &[("class", "lifetime")], &lifetime)?;
    }
    html.close("details")
}

/// Anchor of a related setting: the owner's scope first, then any scope.
/// Names that resolve nowhere keep the owner's scope.
fn related_anchor(
    owner: &Setting,
    related: &RelatedSetting,
    dataset: Option<&Dataset>,
) -> String {
    let target = dataset.and_then(|dataset| {
        dataset
            .find(owner.scope(), &related.name)
            .or_else(|| dataset.find_any(&related.name))
    });
    match target {
        Some(target) => setting_anchor(target),
        None => anchor_id(owner.scope(), &related.name),
    }
}

/// Numeric components of a version id, so `25.10` sorts after `25.9`.
fn version_key(version: &str) -> Vec<u64> {
    version
        .split(|ch: char| !ch.is_ascii_digit())
        .filter_map(|part| part.parse().ok())
        .collect()
}

fn write_related(html: &mut Html, setting: &Setting, dataset: Option<&Dataset>) -> Result<()> {
    if setting.related.is_empty() {
        return Ok(());
    }
    html.open("div", &[("class", "related")])?;
    html.element("span", &[("class", "related-label")], "Related:")?;
    for related in &setting.related {
        let href = format!("#{}", related_anchor(setting, related, dataset));
        let reasons = related.reasons.join(", ");
        html.text(" ")?;
        html.element(
            "a",
            &[("href", href.as_str()), ("title", reasons.as_str())],
            &related.name,
        )?;
    }
    html.close("div")
}

fn write_citations(html: &mut Html, setting: &Setting) -> Result<()> {
    if !setting.has_citations() {
        return Ok(());
    }
    html.open("details", &[("class", "citations")])?;
    let summary = format!("Mentions ({})", setting.mentions.len());
    html.element(
        "summary",
        &[("title", "Mentioned in documentation pages or blog posts")],
        &summary,
    )?;
    html.open("ul", &[])?;
    let cited = setting
        .mentions
        .docs
        .iter()
        .map(|citation| ("docs", citation))
        .chain(setting.mentions.blogs.iter().map(|citation| ("blog", citation)));
    for (kind, citation) in cited {
        html.open("li", &[("class", kind)])?;
        let title = citation.title.as_deref().unwrap_or(&citation.url);
        html.element(
            "a",
            &[("href", citation.url.as_str()), ("target", "_blank"), ("rel", "noopener")],
            title,
        )?;
        if !citation.excerpt.is_empty() {
            html.element("blockquote", &[], &citation.excerpt)?;
        }
        html.close("li")?;
    }
    html.close("ul")?;
    html.close("details")
}
