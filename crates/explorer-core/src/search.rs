//! Free-text search.
//!
//! A query is split into tokens: a double-quoted phrase is kept intact, every
//! other run of non-whitespace is one word. A record matches when ALL tokens
//! occur as substrings of its lowercase haystack.

/// Split `query` into lowercase search tokens.
///
/// An unterminated quote runs to the end of the query. Empty phrases (`""`)
/// are dropped.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = query.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if ch == '"' {
            chars.next();
            for next in chars.by_ref() {
                if next == '"' {
                    break;
                }
                token.push(next);
            }
            let phrase = token.trim();
            if !phrase.is_empty() {
                tokens.push(phrase.to_lowercase());
            }
        } else {
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                token.push(next);
                chars.next();
            }
            tokens.push(token.to_lowercase());
        }
    }
    tokens
}

/// Returns true if every token is a substring of `haystack`.
///
/// `haystack` is expected to be lowercase already; no tokens matches all.
pub fn matches_all(haystack: &str, tokens: &[String]) -> bool {
    tokens.iter().all(|token| haystack.contains(token.as_str()))
}

/// Lowercase haystack for a record: `name description`.
pub fn build_haystack(name: &str, description: &str) -> String {
    let mut haystack = String::with_capacity(name.len() + description.len() + 1);
    haystack.push_str(name);
    haystack.push(' ');
    haystack.push_str(description);
    haystack.to_lowercase()
}
