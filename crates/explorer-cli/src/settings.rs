//! Where the explorer keeps its preferences file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use explorer_core::{ConfigError, ExplorerConfig, Theme};
use tracing::{info, warn};

const CONFIG_FILE: &str = "settings.toml";

/// Default preferences file in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "settings-explorer", "Settings Explorer")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// An explicit path wins over the platform default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(default_config_path)
}

/// Load preferences, falling back to defaults when there is no usable file.
pub fn load_config(path: Option<&Path>) -> ExplorerConfig {
    match path {
        Some(path) => ExplorerConfig::load_or_default(path),
        None => {
            warn!("no config directory available; using default settings");
            ExplorerConfig::default()
        }
    }
}

/// Persist `theme` into the preferences file at `path`.
pub fn save_theme(path: &Path, theme: Theme) -> Result<ExplorerConfig, ConfigError> {
    let mut config = ExplorerConfig::load_or_default(path);
    config.general.dark_mode = theme.is_dark();
    config.save(path)?;
    info!(path = %path.display(), theme = theme.as_str(), "theme saved");
    Ok(config)
}
