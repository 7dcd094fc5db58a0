//! Runtime configuration for the explorer.
//!
//! Stored as TOML; every section and field has a default so partial files
//! work. A missing or unreadable file never stops the explorer: callers use
//! [`ExplorerConfig::load_or_default`] and get defaults plus a warning.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::debounce::SearchCadences;
use crate::error::ConfigError;

/// Explorer settings (persisted as TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub general: GeneralConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

impl ExplorerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(error) => {
                warn!(%error, "using default config");
                Self::default()
            }
        }
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_error)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }
}

/// User preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Dark theme enabled. The only preference persisted between sessions.
    pub dark_mode: bool,
}

/// Debounce and highlight timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before the result list re-renders after typing.
    pub list_debounce_ms: u64,
    /// Delay before facet counts are recomputed after typing.
    pub counts_debounce_ms: u64,
    /// How long a deep-linked row stays highlighted.
    pub highlight_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            list_debounce_ms: 150,
            counts_debounce_ms: 400,
            highlight_ms: 1600,
        }
    }
}

impl TimingConfig {
    pub fn cadences(&self) -> SearchCadences {
        SearchCadences::new(
            Duration::from_millis(self.list_debounce_ms),
            Duration::from_millis(self.counts_debounce_ms),
        )
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Descriptions longer than this are truncated with an expander.
    pub description_preview_chars: usize,
    /// Public address of the explorer page, used for shareable links.
    pub page_url: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_preview_chars: 220,
            page_url: "https://settings-explorer.local/".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn page_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.page_url)
    }
}

/// Light/dark theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
