//! One configurable parameter and its per-version details.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{Scope, Tier, flags_mark_important};

/// A setting as published by the offline extractor.
///
/// Every field is optional in the document; missing or `null` values fall
/// back to their defaults so that one malformed record never aborts a load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setting {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub setting_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_only: bool,
    pub alias: Option<String>,
    /// Raw flags column (`0`, `BETA`, `EXPERIMENTAL | IMPORTANT`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub flags: String,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: BTreeMap<String, VersionInfo>,
    pub introduced_in: Option<String>,
    pub removed_in: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub related: Vec<RelatedSetting>,
    #[serde(deserialize_with = "null_as_default")]
    pub mentions: Mentions,
    /// Documentation link published with the record, when there is one.
    pub docs_url: Option<String>,
    /// Client-side fields computed at load time; never read from the document.
    #[serde(skip)]
    pub annotations: Annotations,
}

/// Fields derived from a setting after it is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub scope: Scope,
    /// Lowercase `name description` used by free-text search.
    pub haystack: String,
    /// Structural tags inferred from name and description.
    pub inferred_topics: BTreeSet<String>,
}

/// Details of a setting in one release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    #[serde(deserialize_with = "scalar_as_string")]
    pub default: String,
    /// `None` when the document omits the tier or uses an unknown label.
    #[serde(deserialize_with = "lenient_tier")]
    pub tier: Option<Tier>,
    #[serde(deserialize_with = "null_as_default")]
    pub changed_from_prev: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub important: bool,
}

/// One entry of the upstream changes history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub version_minor: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub new_default: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
}

/// Cross-reference to another setting computed by the enricher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedSetting {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub reasons: Vec<String>,
}

/// Documentation and blog citations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mentions {
    #[serde(deserialize_with = "null_as_default")]
    pub docs: Vec<Citation>,
    #[serde(deserialize_with = "null_as_default")]
    pub blogs: Vec<Citation>,
}

impl Mentions {
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty() && self.blogs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.docs.len() + self.blogs.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub excerpt: String,
}

impl Setting {
    /// Scope tag attached at load time.
    pub fn scope(&self) -> Scope {
        self.annotations.scope
    }

    pub fn version_info(&self, version: &str) -> Option<&VersionInfo> {
        self.versions.get(version)
    }

    /// Tier for `version`, falling back to the tier implied by `flags`.
    pub fn effective_tier(&self, version: &str) -> Tier {
        self.version_info(version)
            .and_then(|info| info.tier)
            .unwrap_or_else(|| Tier::from_flags(&self.flags))
    }

    pub fn changed_in(&self, version: &str) -> bool {
        self.version_info(version)
            .is_some_and(|info| info.changed_from_prev)
    }

    pub fn has_citations(&self) -> bool {
        !self.mentions.is_empty()
    }

    /// Marked important by its flags or by the entry for `version`.
    pub fn is_important(&self, version: Option<&str>) -> bool {
        flags_mark_important(&self.flags)
            || version
                .and_then(|version| self.version_info(version))
                .is_some_and(|info| info.important)
    }

    /// Topic values of this setting: the category label plus inferred tags.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        let category = (!self.category.trim().is_empty()).then_some(self.category.as_str());
        category.into_iter().chain(
            self.annotations
                .inferred_topics
                .iter()
                .map(String::as_str)
                .filter(move |tag| Some(*tag) != category),
        )
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics().any(|value| value == topic)
    }

    /// Link to the upstream documentation entry. A link carried by the
    /// record wins over the one built from the scope's docs page.
    pub fn docs_url(&self) -> String {
        match self.docs_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("{}#{}", self.scope().docs_page(), self.name),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// Defaults are strings in the document, but older extracts wrote numbers.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(text)) => text,
        Some(Scalar::Integer(value)) => value.to_string(),
        Some(Scalar::Float(value)) => value.to_string(),
        Some(Scalar::Bool(value)) => value.to_string(),
        None => String::new(),
    })
}

fn lenient_tier<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}
