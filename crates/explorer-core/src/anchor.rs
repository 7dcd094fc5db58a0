//! Row anchors and deep links.

use explorer_model::{Scope, Setting};
use url::Url;

/// Lowercase `name`, collapsing every run of non-alphanumeric characters
/// into a single `-` and trimming separators from both ends.
pub fn sanitize_anchor(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Stable anchor id of a row: `<scope prefix>-<sanitized name>`.
pub fn anchor_id(scope: Scope, name: &str) -> String {
    format!("{}-{}", scope.anchor_prefix(), sanitize_anchor(name))
}

pub fn setting_anchor(setting: &Setting) -> String {
    anchor_id(setting.scope(), &setting.name)
}

/// Strip the leading `#` of a location fragment.
pub fn normalize_fragment(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// Index of the row whose anchor equals `fragment`.
pub fn find_anchor<'a, I>(rows: I, fragment: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a Setting>,
{
    let wanted = normalize_fragment(fragment);
    if wanted.is_empty() {
        return None;
    }
    rows.into_iter()
        .position(|setting| setting_anchor(setting) == wanted)
}

/// The current page URL pointing at one row.
pub fn deep_link(page: &Url, anchor: &str) -> Url {
    let mut link = page.clone();
    link.set_fragment(Some(normalize_fragment(anchor)));
    link
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_anchor("max_threads"), "max-threads");
        assert_eq!(sanitize_anchor("  Input__Format.CSV  "), "input-format-csv");
        assert_eq!(sanitize_anchor("a--b"), "a-b");
        assert_eq!(sanitize_anchor("__"), "");
    }

    #[test]
    fn anchor_uses_scope_prefix() {
        assert_eq!(anchor_id(Scope::Session, "max_threads"), "s-max-threads");
        assert_eq!(
            anchor_id(Scope::MergeTree, "index_granularity"),
            "mt-index-granularity"
        );
    }

    #[test]
    fn deep_link_replaces_fragment() {
        let page = Url::parse("https://example.com/explorer/?q=threads#old").unwrap();
        let link = deep_link(&page, "#s-max-threads");
        assert_eq!(
            link.as_str(),
            "https://example.com/explorer/?q=threads#s-max-threads"
        );
    }
}
