//! Preference file handling.

use explorer_cli::{load_config, resolve_config_path, save_theme};
use explorer_core::{ExplorerConfig, Theme};

#[test]
fn explicit_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    assert_eq!(resolve_config_path(Some(path.as_path())), Some(path.clone()));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(dir.path().join("absent.toml").as_path()));
    assert_eq!(config, ExplorerConfig::default());
    assert_eq!(load_config(None), ExplorerConfig::default());
}

#[test]
fn theme_survives_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let saved = save_theme(&path, Theme::Dark).unwrap();
    assert!(saved.general.dark_mode);
    assert!(load_config(Some(path.as_path())).general.dark_mode);

    save_theme(&path, Theme::Light).unwrap();
    assert_eq!(
        Theme::from_dark_mode(load_config(Some(path.as_path())).general.dark_mode),
        Theme::Light
    );
}

#[test]
fn saving_keeps_other_preferences() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    let mut config = ExplorerConfig::default();
    config.timing.list_debounce_ms = 90;
    config.save(&path).unwrap();

    save_theme(&path, Theme::Dark).unwrap();
    let reloaded = load_config(Some(path.as_path()));
    assert_eq!(reloaded.timing.list_debounce_ms, 90);
    assert!(reloaded.general.dark_mode);
}
