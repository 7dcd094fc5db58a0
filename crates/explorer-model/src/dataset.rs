//! The dataset document: three scope collections plus known versions.

use serde::{Deserialize, Serialize};

use crate::enums::Scope;
use crate::setting::Setting;

/// Top-level dataset document.
///
/// Field names follow the extractor output (`settings`,
/// `merge_tree_settings`, `format_settings`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Known version identifiers, oldest first.
    pub versions: Vec<String>,
    #[serde(rename = "settings")]
    pub session: Vec<Setting>,
    #[serde(rename = "merge_tree_settings")]
    pub merge_tree: Vec<Setting>,
    #[serde(rename = "format_settings")]
    pub format: Vec<Setting>,
}

impl Dataset {
    pub fn scope(&self, scope: Scope) -> &[Setting] {
        match scope {
            Scope::Session => &self.session,
            Scope::MergeTree => &self.merge_tree,
            Scope::Format => &self.format,
        }
    }

    pub fn scope_mut(&mut self, scope: Scope) -> &mut Vec<Setting> {
        match scope {
            Scope::Session => &mut self.session,
            Scope::MergeTree => &mut self.merge_tree,
            Scope::Format => &mut self.format,
        }
    }

    /// Iterate over every setting in scope display order.
    pub fn iter(&self) -> impl Iterator<Item = (Scope, &Setting)> {
        Scope::all()
            .iter()
            .flat_map(move |scope| self.scope(*scope).iter().map(move |s| (*scope, s)))
    }

    pub fn len(&self) -> usize {
        self.session.len() + self.merge_tree.len() + self.format.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The newest known version, used when no version is selected.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// Case-insensitive lookup of a setting by name within one scope.
    pub fn find(&self, scope: Scope, name: &str) -> Option<&Setting> {
        self.scope(scope)
            .iter()
            .find(|setting| setting.name.eq_ignore_ascii_case(name))
    }

    /// Lookup across all scopes; the first scope in display order wins.
    pub fn find_any(&self, name: &str) -> Option<&Setting> {
        Scope::all().iter().find_map(|scope| self.find(*scope, name))
    }
}
