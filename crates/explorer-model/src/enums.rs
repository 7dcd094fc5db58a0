//! Type-safe enumerations for the settings dataset.
//!
//! These enums give compile-time safety to concepts that appear as plain
//! strings in the dataset document and in URL query parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Top-level grouping of settings.
///
/// The dataset document carries one array per scope:
/// - **Session**: runtime/query-level settings (`settings`)
/// - **MergeTree**: storage-engine/table-level settings (`merge_tree_settings`)
/// - **Format**: input/output format settings (`format_settings`)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Session,
    MergeTree,
    Format,
}

impl Scope {
    /// Returns the identifier used in URLs and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Session => "session",
            Scope::MergeTree => "mergetree",
            Scope::Format => "format",
        }
    }

    /// Returns the human-readable label used on pills and chips.
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Session => "Session",
            Scope::MergeTree => "MergeTree",
            Scope::Format => "Format",
        }
    }

    /// Short prefix for row anchors (`#s-max-threads`).
    pub fn anchor_prefix(&self) -> &'static str {
        match self {
            Scope::Session => "s",
            Scope::MergeTree => "mt",
            Scope::Format => "fmt",
        }
    }

    /// Documentation page that lists settings of this scope.
    pub fn docs_page(&self) -> &'static str {
        match self {
            Scope::Session => "https://clickhouse.com/docs/operations/settings/settings",
            Scope::MergeTree => {
                "https://clickhouse.com/docs/operations/settings/merge-tree-settings"
            }
            Scope::Format => "https://clickhouse.com/docs/operations/settings/formats",
        }
    }

    /// Tooltip text explaining the scope.
    pub fn help(&self) -> &'static str {
        match self {
            Scope::Session => "Query-level settings, changeable per session or per query",
            Scope::MergeTree => "Table-level settings of the MergeTree storage engine",
            Scope::Format => "Settings that control input and output formats",
        }
    }

    /// All scopes in display order.
    pub const fn all() -> &'static [Scope] {
        &[Scope::Session, Scope::MergeTree, Scope::Format]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "session" | "settings" => Ok(Scope::Session),
            "mergetree" | "merge_tree" | "merge-tree" | "storage-engine" => Ok(Scope::MergeTree),
            "format" | "formats" => Ok(Scope::Format),
            _ => Err(ModelError::UnknownScope(s.to_string())),
        }
    }
}

/// Stability classification of a setting for one version.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Production,
    Beta,
    Experimental,
    Obsolete,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Production => "production",
            Tier::Beta => "beta",
            Tier::Experimental => "experimental",
            Tier::Obsolete => "obsolete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Production => "Production",
            Tier::Beta => "Beta",
            Tier::Experimental => "Experimental",
            Tier::Obsolete => "Obsolete",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Tier::Production => "Stable and safe to use in production",
            Tier::Beta => "Feature is usable but may still change",
            Tier::Experimental => "Under active development; not for production use",
            Tier::Obsolete => "Kept for compatibility; has no effect",
        }
    }

    /// Derive a tier from the raw flags column of the settings declaration.
    ///
    /// Flags look like `0`, `BETA`, `EXPERIMENTAL`, `IMPORTANT` or bitwise
    /// combinations of those. Experimental wins over beta, beta over obsolete.
    pub fn from_flags(flags: &str) -> Tier {
        let mut tier = Tier::Production;
        for token in flag_tokens(flags) {
            let candidate = match token.to_ascii_lowercase().as_str() {
                "experimental" => Tier::Experimental,
                "beta" => Tier::Beta,
                "obsolete" => Tier::Obsolete,
                _ => continue,
            };
            if candidate.precedence() > tier.precedence() {
                tier = candidate;
            }
        }
        tier
    }

    fn precedence(&self) -> u8 {
        match self {
            Tier::Production => 0,
            Tier::Obsolete => 1,
            Tier::Beta => 2,
            Tier::Experimental => 3,
        }
    }

    pub const fn all() -> &'static [Tier] {
        &[
            Tier::Production,
            Tier::Beta,
            Tier::Experimental,
            Tier::Obsolete,
        ]
    }
}

/// Returns true if the raw flags mark the setting as important.
pub fn flags_mark_important(flags: &str) -> bool {
    flag_tokens(flags).any(|token| token.eq_ignore_ascii_case("important"))
}

fn flag_tokens(flags: &str) -> impl Iterator<Item = &str> {
    flags
        .split(|c: char| !(c.is_ascii_alphabetic() || c == '_'))
        .filter(|token| !token.is_empty())
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Tier::Production),
            "beta" => Ok(Tier::Beta),
            "experimental" => Ok(Tier::Experimental),
            "obsolete" => Ok(Tier::Obsolete),
            _ => Err(ModelError::UnknownTier(s.to_string())),
        }
    }
}

/// Independent boolean gates offered next to the facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialFlag {
    /// Only settings that take effect in the managed cloud offering.
    Cloud,
    /// Only settings cited by documentation pages or blog posts.
    Cited,
}

impl SpecialFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialFlag::Cloud => "cloud",
            SpecialFlag::Cited => "cited",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpecialFlag::Cloud => "Cloud only",
            SpecialFlag::Cited => "Has citations",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            SpecialFlag::Cloud => "Show only settings that only have an effect in the cloud service",
            SpecialFlag::Cited => "Show only settings mentioned in docs or blog posts",
        }
    }

    pub const fn all() -> &'static [SpecialFlag] {
        &[SpecialFlag::Cloud, SpecialFlag::Cited]
    }
}

impl fmt::Display for SpecialFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpecialFlag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cloud" | "cloud_only" => Ok(SpecialFlag::Cloud),
            "cited" | "mentions" => Ok(SpecialFlag::Cited),
            _ => Err(ModelError::UnknownFlag(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_str() {
        assert_eq!("session".parse::<Scope>().unwrap(), Scope::Session);
        assert_eq!("MergeTree".parse::<Scope>().unwrap(), Scope::MergeTree);
        assert_eq!("storage-engine".parse::<Scope>().unwrap(), Scope::MergeTree);
        assert_eq!(" formats ".parse::<Scope>().unwrap(), Scope::Format);
        assert!("table".parse::<Scope>().is_err());
    }

    #[test]
    fn test_tier_from_flags() {
        assert_eq!(Tier::from_flags("0"), Tier::Production);
        assert_eq!(Tier::from_flags(""), Tier::Production);
        assert_eq!(Tier::from_flags("BETA"), Tier::Beta);
        assert_eq!(Tier::from_flags("IMPORTANT | EXPERIMENTAL"), Tier::Experimental);
        assert_eq!(Tier::from_flags("BETA|EXPERIMENTAL"), Tier::Experimental);
        assert_eq!(Tier::from_flags("OBSOLETE"), Tier::Obsolete);
    }

    #[test]
    fn test_important_flag() {
        assert!(flags_mark_important("IMPORTANT"));
        assert!(flags_mark_important("BETA | important"));
        assert!(!flags_mark_important("0"));
    }

    #[test]
    fn test_scope_order_matches_display_order() {
        let mut scopes = vec![Scope::Format, Scope::Session, Scope::MergeTree];
        scopes.sort();
        assert_eq!(scopes, Scope::all());
    }
}
