use xdg::BaseDirectories;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::settings::{Theme, DEFAULT_ACCENT_COLOR};
use crate::storage::FileStorage;
use crate::store::{StoreOptions, DEFAULT_STORAGE_KEY};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub persist_settings: bool,
    pub storage_key: String,
    /// Overrides the default storage area location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<String>,
    pub initial_theme: Theme,
    pub initial_accent_color: String,
    /// Seconds between reduced-motion probes
    pub motion_poll_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            persist_settings: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_file: None,
            initial_theme: Theme::default(),
            initial_accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            motion_poll_interval: 5,
        }
    }
}

impl Config {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            initial_theme: self.initial_theme,
            initial_accent_color: self.initial_accent_color.clone(),
            persist: self.persist_settings,
            storage_key: self.storage_key.clone(),
        }
    }

    /// Location of the storage area: the configured file, else the XDG default
    pub fn storage_path(&self) -> Option<PathBuf> {
        match &self.storage_file {
            Some(file) => Some(PathBuf::from(file)),
            None => FileStorage::default_path(),
        }
    }

    /// Probe interval, never shorter than one second
    pub fn motion_poll_interval(&self) -> Duration {
        Duration::from_secs(self.motion_poll_interval.max(1))
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    match get_config_path() {
        Some(path) => read_from(&path),
        None => Config::default(),
    }
}

/// Read config from `path`, falling back to defaults if missing or invalid
pub fn read_from(path: &Path) -> Config {
    // Check if file exists
    if !path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Invalid config file {}: {}", path.display(), e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.log_file, "/dev/null");
        assert!(config.persist_settings);
        assert_eq!(config.storage_key, "portfolio-theme-settings-v2");
        assert_eq!(config.initial_theme, Theme::Cyberpunk);
        assert_eq!(config.initial_accent_color, "#00f0d3");
    }

    #[test]
    fn test_config_from_toml_partial() {
        let toml_str = r##"
log_level = "debug"
initial_theme = "neon"
initial_accent_color = "#ff00aa"
persist_settings = false
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.initial_theme, Theme::Neon);
        assert_eq!(config.initial_accent_color, "#ff00aa");
        assert!(!config.persist_settings);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.motion_poll_interval, 5);
    }

    #[test]
    fn test_config_store_options() {
        let config = Config {
            initial_theme: Theme::Glass,
            storage_key: "custom".to_string(),
            persist_settings: false,
            ..Config::default()
        };
        let options = config.store_options();
        assert_eq!(options.initial_theme, Theme::Glass);
        assert_eq!(options.initial_accent_color, "#00f0d3");
        assert_eq!(options.storage_key, "custom");
        assert!(!options.persist);
    }

    #[test]
    fn test_config_storage_file_override() {
        let config = Config {
            storage_file: Some("/tmp/area.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.storage_path(), Some(PathBuf::from("/tmp/area.json")));
    }

    #[test]
    fn test_motion_poll_interval_floor() {
        let config = Config { motion_poll_interval: 0, ..Config::default() };
        assert_eq!(config.motion_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_read_from_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(read_from(&path), Config::default());

        fs::write(&path, "initial_theme = \"vaporwave\"").unwrap();
        assert_eq!(read_from(&path), Config::default());

        fs::write(&path, "storage_key = \"k2\"").unwrap();
        assert_eq!(read_from(&path).storage_key, "k2");
    }
}
