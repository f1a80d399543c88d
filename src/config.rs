//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/agentvibes/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's platform config directory. Every field has a default, so an
//! empty object (or no file at all) is a valid configuration. Command-line
//! flags override whatever is stored here.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/agentvibes/config.json
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.
//!
//! ## Example
//!
//! ```json
//! {
//!   "theme": "Catppuccin Mocha",
//!   "columns": 3,
//!   "show_usage": false,
//!   "personalities_dir": "/home/me/.claude/personalities"
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::columns::DEFAULT_COLUMNS;
use crate::render::Theme;

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Items per row in every listing.
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Whether listings end with a footer of example commands.
    #[serde(default = "default_show_usage")]
    pub show_usage: bool,

    /// Where personality markdown files live. Defaults to
    /// `~/.claude/personalities`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalities_dir: Option<PathBuf>,

    /// Where Piper `.onnx` voice models live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voices_dir: Option<PathBuf>,
}

fn default_theme_name() -> String {
    Theme::default_theme().name.to_string()
}

fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

fn default_show_usage() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            columns: default_columns(),
            show_usage: default_show_usage(),
            personalities_dir: None,
            voices_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "using default configuration");
                Self::default()
            }
        }
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The configured theme, or the default theme if the name is unknown.
    pub fn resolve_theme(&self) -> &'static Theme {
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme, using default");
            Theme::default_theme()
        })
    }

    /// The personalities directory: configured value, else
    /// `~/.claude/personalities`.
    pub fn personalities_dir(&self) -> Option<PathBuf> {
        self.personalities_dir
            .clone()
            .or_else(|| home_dir().map(|home| home.join(".claude").join("personalities")))
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "agentvibes")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "Classic");
        assert_eq!(config.columns, 2);
        assert!(config.show_usage);
        assert_eq!(config.personalities_dir, None);
        assert_eq!(config.voices_dir, None);
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{"columns": 3, "voices_dir": "/opt/piper"}"#;
        let config: Config = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.columns, 3);
        assert_eq!(config.voices_dir, Some(PathBuf::from("/opt/piper")));
        assert_eq!(config.theme, "Classic");
        assert!(config.show_usage);
    }

    #[test]
    fn test_save_to_load_from_roundtrip() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("subdir").join("config.json");

        let config = Config {
            theme: "Plain".to_string(),
            columns: 1,
            show_usage: false,
            personalities_dir: Some(PathBuf::from("/tmp/personalities")),
            voices_dir: None,
        };

        config.save_to(&config_path).expect("save_to");
        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_none_dirs_are_not_serialized() {
        let json = serde_json::to_string(&Config::default()).expect("serialize");
        assert!(!json.contains("personalities_dir"));
        assert!(!json.contains("voices_dir"));
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("does_not_exist.json");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_from_invalid_json_is_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").expect("write");

        let err = Config::load_from(&config_path).expect_err("invalid json");
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_deny_unknown_fields() {
        let json = r#"{"theme": "Classic", "unknown_field": true}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject unknown fields");
    }

    #[test]
    fn test_resolve_theme_falls_back_to_default() {
        let config = Config {
            theme: "Nonexistent".to_string(),
            ..Config::default()
        };
        assert_eq!(config.resolve_theme().name, "Classic");

        let config = Config {
            theme: "catppuccin mocha".to_string(),
            ..Config::default()
        };
        assert_eq!(config.resolve_theme().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_configured_personalities_dir_wins() {
        let config = Config {
            personalities_dir: Some(PathBuf::from("/srv/personalities")),
            ..Config::default()
        };
        assert_eq!(
            config.personalities_dir(),
            Some(PathBuf::from("/srv/personalities"))
        );
    }
}
