//! Inferred topic tags.
//!
//! Categories in the dataset are a single label per setting. To make the
//! topic facet more useful, each setting additionally receives structural
//! tags inferred by pattern-matching the lowercase `name description` text.
//! These tags are a client-side convenience, not authoritative metadata.
//!
//! Rules are independent: every rule whose pattern matches adds its tag, so a
//! setting may carry several tags.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// One keyword rule: `pattern` is matched against lowercase text.
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub tag: &'static str,
    pub pattern: &'static str,
}

/// Built-in rules, in the order tags are reported.
///
/// The text a rule sees is `name + " " + description`, so `^` anchors to the
/// start of the setting name.
pub const DEFAULT_RULES: &[TopicRule] = &[
    TopicRule {
        tag: "Memory",
        pattern: r"\bmemory\b|max_bytes|_bytes_|bytes_before",
    },
    TopicRule {
        tag: "Threads",
        pattern: r"thread|concurren|parallel",
    },
    TopicRule {
        tag: "Timeouts",
        pattern: r"timeout|_ms\b|_sec\b|_seconds\b",
    },
    TopicRule {
        tag: "Limits",
        pattern: r"^max_|^min_|\blimit",
    },
    TopicRule {
        tag: "Network",
        pattern: r"network|\btcp\b|\bhttp|connection|socket|bandwidth",
    },
    TopicRule {
        tag: "Distributed",
        pattern: r"distributed|replica|shard|cluster",
    },
    TopicRule {
        tag: "Joins",
        pattern: r"\bjoin",
    },
    TopicRule {
        tag: "Aggregation",
        pattern: r"aggregat|group_by|group by",
    },
    TopicRule {
        tag: "Sorting",
        pattern: r"\bsort|order by|order_by",
    },
    TopicRule {
        tag: "Caching",
        pattern: r"cache",
    },
    TopicRule {
        tag: "Compression",
        pattern: r"compress|codec|\blz4\b|\bzstd\b",
    },
    TopicRule {
        tag: "Inserts",
        pattern: r"\binsert",
    },
    TopicRule {
        tag: "Merges",
        pattern: r"\bmerges?\b|_merge",
    },
    TopicRule {
        tag: "Object Storage",
        pattern: r"\bs3\b|s3_|azure|\bhdfs\b|object storage|object_storage",
    },
    TopicRule {
        tag: "Logging",
        pattern: r"\blog_|\blogs?\b|trace|profil",
    },
    TopicRule {
        tag: "Security",
        pattern: r"password|\bssl\b|\btls\b|readonly|\bgrants?\b",
    },
    TopicRule {
        tag: "Toggles",
        pattern: r"^allow_|^enable_|^use_",
    },
];

/// Compiled topic rules.
#[derive(Debug, Clone)]
pub struct TopicRules {
    rules: Vec<(String, Regex)>,
}

static DEFAULT_TOPIC_RULES: LazyLock<TopicRules> =
    LazyLock::new(|| TopicRules::compile_lenient(DEFAULT_RULES));

impl TopicRules {
    /// Shared instance of [`DEFAULT_RULES`].
    pub fn builtin() -> &'static TopicRules {
        &DEFAULT_TOPIC_RULES
    }

    /// Compile rules, failing on the first invalid pattern.
    pub fn compile(rules: &[TopicRule]) -> Result<Self, regex::Error> {
        let compiled = rules
            .iter()
            .map(|rule| Ok((rule.tag.to_string(), Regex::new(rule.pattern)?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules: compiled })
    }

    /// Compile rules, skipping (and logging) invalid patterns.
    fn compile_lenient(rules: &[TopicRule]) -> Self {
        let compiled = rules
            .iter()
            .filter_map(|rule| match Regex::new(rule.pattern) {
                Ok(regex) => Some((rule.tag.to_string(), regex)),
                Err(error) => {
                    warn!(tag = rule.tag, %error, "skipping invalid topic rule");
                    None
                }
            })
            .collect();
        Self { rules: compiled }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tags of every rule matching `text`. The caller lowercases `text`.
    pub fn infer(&self, text: &str) -> BTreeSet<String> {
        self.rules
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_all_compile() {
        assert_eq!(TopicRules::builtin().len(), DEFAULT_RULES.len());
        assert!(TopicRules::compile(DEFAULT_RULES).is_ok());
    }

    #[test]
    fn rules_are_not_mutually_exclusive() {
        let tags = TopicRules::builtin()
            .infer("max_memory_usage maximum amount of memory to use for running a query");
        assert!(tags.contains("Memory"));
        assert!(tags.contains("Limits"));
    }

    #[test]
    fn name_anchored_rules_ignore_description() {
        let tags = TopicRules::builtin().infer("join_algorithm use_ is mentioned here: max_");
        assert!(tags.contains("Joins"));
        assert!(!tags.contains("Toggles"));
        assert!(!tags.contains("Limits"));
    }

    #[test]
    fn unmatched_text_has_no_tags() {
        assert!(TopicRules::builtin().infer("dialect sql dialect").is_empty());
    }

    #[test]
    fn invalid_rule_is_reported() {
        let rules = [TopicRule {
            tag: "Broken",
            pattern: "(unclosed",
        }];
        assert!(TopicRules::compile(&rules).is_err());
    }
}
