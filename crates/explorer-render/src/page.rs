//! Full page and page fragments for an explorer session.

use std::error::Error;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use explorer_core::{ExplorerSession, Shortcut};
use tracing::debug;

use crate::controls::{PageLayout, write_facet_groups, write_toolbar};
use crate::error::Result;
use crate::html::Html;
use crate::row::{RowContext, write_row};

const STYLESHEET: &str = include_str!("../assets/explorer.css");

/// Page-level options.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    /// Stamp written into the footer; `None` leaves it out.
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Settings Explorer".to_string(),
            generated_at: None,
        }
    }
}

/// Render a complete HTML document for the current session state.
pub fn render_page(
    session: &ExplorerSession,
    layout: &PageLayout,
    options: &PageOptions,
    now: Instant,
) -> Result<String> {
    let mut html = Html::indented();
    html.doctype()?;
    html.open(
        "html",
        &[("lang", "en"), ("data-theme", session.theme().as_str())],
    )?;
    write_head(&mut html, &options.title)?;

    html.open("body", &[])?;
    html.open("header", &[("class", "page-head")])?;
    html.element("h1", &[], &options.title)?;
    write_toolbar(&mut html, session.state(), session.options())?;
    html.close("header")?;

    html.open("nav", &[("class", "facets")])?;
    write_facet_groups(
        &mut html,
        layout,
        session.state(),
        session.options(),
        session.counts(),
    )?;
    html.close("nav")?;

    let summary = session.summary().to_string();
    html.element("p", &[("class", "summary"), ("id", "summary")], &summary)?;

    html.open("main", &[("id", "results")])?;
    write_rows(&mut html, session, session.highlighted(now))?;
    html.close("main")?;

    write_footer(&mut html, options)?;
    html.close("body")?;
    html.close("html")?;
    debug!(rows = session.visible_len(), "page rendered");
    html.finish()
}

/// Render only the visible rows. The list is rebuilt in full on every
/// filter change.
pub fn render_list(session: &ExplorerSession, now: Instant) -> Result<String> {
    let mut html = Html::new();
    write_rows(&mut html, session, session.highlighted(now))?;
    html.finish()
}

/// The "Showing N of M settings" line.
pub fn render_summary(session: &ExplorerSession) -> Result<String> {
    let mut html = Html::new();
    let summary = session.summary().to_string();
    html.element("p", &[("class", "summary"), ("id", "summary")], &summary)?;
    html.finish()
}

/// Every facet group present in `layout`.
pub fn render_facets(session: &ExplorerSession, layout: &PageLayout) -> Result<String> {
    let mut html = Html::new();
    write_facet_groups(
        &mut html,
        layout,
        session.state(),
        session.options(),
        session.counts(),
    )?;
    html.finish()
}

/// Page shown when the dataset could not be loaded.
pub fn render_load_error(error: &dyn Error, options: &PageOptions) -> Result<String> {
    let mut html = Html::indented();
    html.doctype()?;
    html.open("html", &[("lang", "en")])?;
    write_head(&mut html, &options.title)?;
    html.open("body", &[])?;
    html.element("h1", &[], &options.title)?;
    html.open("div", &[("class", "load-error"), ("role", "alert")])?;
    html.element("p", &[], "The settings dataset could not be loaded.")?;
    html.element("pre", &[], &error.to_string())?;
    let mut source = error.source();
    while let Some(cause) = source {
        html.element("pre", &[("class", "cause")], &cause.to_string())?;
        source = cause.source();
    }
    html.close("div")?;
    html.close("body")?;
    html.close("html")?;
    html.finish()
}

fn write_head(html: &mut Html, title: &str) -> Result<()> {
    html.open("head", &[])?;
    html.void("meta", &[("charset", "utf-8")])?;
    html.void(
        "meta",
        &[
            ("name", "viewport"),
            ("content", "width=device-width, initial-scale=1"),
        ],
    )?;
    html.element("title", &[], title)?;
    html.open("style", &[])?;
    html.raw(STYLESHEET)?;
    html.close("style")?;
    html.close("head")
}

fn write_rows(
    html: &mut Html,
    session: &ExplorerSession,
    highlighted: Option<&str>,
) -> Result<()> {
    let version = session.options().version.as_deref();
    let version = session.state().version.as_deref().or(version);
    let ctx = RowContext {
        version,
        page_url: session.current_url(),
        preview_chars: session.config().display.description_preview_chars,
        highlighted,
        dataset: session.dataset(),
    };
    for setting in session.visible_settings() {
        write_row(html, setting, &ctx)?;
    }
    Ok(())
}

fn write_footer(html: &mut Html, options: &PageOptions) -> Result<()> {
    html.open("footer", &[("class", "page-foot")])?;
    html.open("ul", &[("class", "shortcuts")])?;
    for shortcut in Shortcut::all() {
        html.open("li", &[])?;
        html.element("kbd", &[], shortcut.key())?;
        html.text(&format!(" {}", shortcut.display_name()))?;
        html.close("li")?;
    }
    html.close("ul")?;
    if let Some(generated_at) = options.generated_at {
        let stamp = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        html.element("p", &[("class", "generated")], &format!("Generated {stamp}"))?;
    }
    html.close("footer")
}
