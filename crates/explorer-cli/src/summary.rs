use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use explorer_core::{ExplorerSession, Facet, Shortcut};
use explorer_model::{Setting, Tier};

const DESCRIPTION_CHARS: usize = 90;

pub fn settings_table(session: &ExplorerSession, limit: Option<usize>) -> Table {
    let version = selected_version(session);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Scope"),
        header_cell("Type"),
        header_cell(&format!("Default ({})", version.unwrap_or("-"))),
        header_cell("Tier"),
        header_cell("Topics"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for setting in session.visible_settings().take(limit.unwrap_or(usize::MAX)) {
        let default = version
            .and_then(|version| setting.version_info(version))
            .map(|info| {
                if info.changed_from_prev {
                    Cell::new(format!("{} *", info.default)).fg(Color::Yellow)
                } else {
                    Cell::new(&info.default)
                }
            })
            .unwrap_or_else(|| dim_cell("-"));
        table.add_row(vec![
            Cell::new(&setting.name).add_attribute(Attribute::Bold),
            Cell::new(setting.scope().label()),
            Cell::new(&setting.setting_type),
            default,
            tier_cell(tier_of(setting, version)),
            Cell::new(setting.topics().collect::<Vec<_>>().join(", ")),
            dim_cell(short_description(&setting.description)),
        ]);
    }
    table
}

pub fn facets_table(session: &ExplorerSession) -> Table {
    let state = session.state();
    let options = session.options();
    let counts = session.counts();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Facet"),
        header_cell("Value"),
        header_cell("Count"),
        header_cell("Selected"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    let mut rows: Vec<(Facet, String, usize, bool)> = Vec::new();
    for scope in &options.scopes {
        let count = counts.scopes.get(scope).copied().unwrap_or_default();
        rows.push((Facet::Scope, scope.label().to_string(), count, state.scopes.contains(scope)));
    }
    for topic in &options.topics {
        let count = counts.topics.get(topic).copied().unwrap_or_default();
        rows.push((Facet::Topic, topic.clone(), count, state.topics.contains(topic)));
    }
    for tier in &options.tiers {
        let count = counts.tiers.get(tier).copied().unwrap_or_default();
        rows.push((Facet::Tier, tier.label().to_string(), count, state.tiers.contains(tier)));
    }
    for flag in &options.flags {
        let count = counts.flags.get(flag).copied().unwrap_or_default();
        rows.push((Facet::Flag, flag.label().to_string(), count, state.flags.contains(flag)));
    }

    for (facet, value, count, selected) in rows {
        let count = if count == 0 {
            dim_cell(count)
        } else {
            Cell::new(count)
        };
        let selected = if selected {
            Cell::new("✓").fg(Color::Green)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(facet.label()), Cell::new(value), count, selected]);
    }
    table
}

pub fn setting_table(setting: &Setting, version: Option<&str>) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let mut field = |label: &str, value: Cell| {
        table.add_row(vec![header_cell(label), value]);
    };
    field("Name", Cell::new(&setting.name).add_attribute(Attribute::Bold));
    field("Scope", Cell::new(setting.scope().label()));
    if !setting.setting_type.is_empty() {
        field("Type", Cell::new(&setting.setting_type));
    }
    if let Some(alias) = setting.alias.as_deref().filter(|alias| !alias.is_empty()) {
        field("Alias", Cell::new(alias));
    }
    field("Tier", tier_cell(tier_of(setting, version)));
    let topics: Vec<&str> = setting.topics().collect();
    if !topics.is_empty() {
        field("Topics", Cell::new(topics.join(", ")));
    }
    if setting.cloud_only {
        field("Cloud only", Cell::new("yes"));
    }
    if setting.is_important(version) {
        field("Important", Cell::new("yes"));
    }
    if let Some((version, info)) =
        version.and_then(|version| Some((version, setting.version_info(version)?)))
    {
        let mut value = info.default.clone();
        if info.changed_from_prev {
            value.push_str(" (changed)");
        }
        field(&format!("Default in {version}"), Cell::new(value));
    }
    if !setting.history.is_empty() {
        let history: Vec<String> = setting
            .history
            .iter()
            .map(|entry| {
                let mut line = format!("{}: {}", entry.version_minor, entry.new_default);
                if !entry.comment.is_empty() {
                    line.push_str(&format!(" ({})", entry.comment));
                }
                line
            })
            .collect();
        field("History", Cell::new(history.join("\n")));
    }
    if let Some(introduced) = &setting.introduced_in {
        field("Introduced", Cell::new(introduced));
    }
    if let Some(removed) = &setting.removed_in {
        field("Removed", Cell::new(removed));
    }
    if !setting.related.is_empty() {
        let related: Vec<&str> = setting
            .related
            .iter()
            .map(|related| related.name.as_str())
            .collect();
        field("Related", Cell::new(related.join(", ")));
    }
    if setting.has_citations() {
        let citations: Vec<&str> = setting
            .mentions
            .docs
            .iter()
            .chain(&setting.mentions.blogs)
            .map(|citation| citation.url.as_str())
            .collect();
        field("Mentions", Cell::new(citations.join("\n")));
    }
    field("Docs", Cell::new(setting.docs_url()));
    if !setting.description.trim().is_empty() {
        field("Description", Cell::new(setting.description.trim()));
    }
    table
}

pub fn shortcuts_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Action")]);
    apply_table_style(&mut table);
    for shortcut in Shortcut::all() {
        table.add_row(vec![
            Cell::new(shortcut.key()).add_attribute(Attribute::Bold),
            Cell::new(shortcut.display_name()),
        ]);
    }
    table
}

/// Explicitly selected version, else the latest one.
pub fn selected_version(session: &ExplorerSession) -> Option<&str> {
    session
        .state()
        .version
        .as_deref()
        .or(session.options().version.as_deref())
}

fn tier_of(setting: &Setting, version: Option<&str>) -> Tier {
    match version {
        Some(version) => setting.effective_tier(version),
        None => Tier::from_flags(&setting.flags),
    }
}

fn tier_cell(tier: Tier) -> Cell {
    let color = match tier {
        Tier::Production => return Cell::new(tier.label()),
        Tier::Beta => Color::Yellow,
        Tier::Experimental => Color::Magenta,
        Tier::Obsolete => Color::DarkGrey,
    };
    Cell::new(tier.label()).fg(color)
}

fn short_description(description: &str) -> String {
    let description = description.trim();
    match description.char_indices().nth(DESCRIPTION_CHARS) {
        Some((cut, _)) => format!("{}…", description[..cut].trim_end()),
        None => description.to_string(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
