//! Configuration management for search-bridge
//!
//! Handles loading, saving, and layering caller defaults.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use search_bridge_core::options::keys;
use search_bridge_core::SortBy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path to config file (not serialized)
    #[serde(skip)]
    pub config_path: PathBuf,
}

/// Defaults merged underneath every caller's options.
///
/// Mirrors the scripting wrapper's defaults, which differ from the adapter's
/// own (limit 100, ascending sort).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub offset: u32,
    /// 0 = no limit
    pub limit: u32,
    pub match_case: bool,
    pub match_whole_word: bool,
    pub match_path: bool,
    pub enable_regex: bool,
    pub include_size: bool,
    pub include_date_created: bool,
    pub include_date_modified: bool,
    pub include_date_accessed: bool,
    pub include_run_count: bool,
    pub sort_asc: bool,
    pub sort_by: SortBy,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or EnvFilter directive
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
            match_case: false,
            match_whole_word: false,
            match_path: false,
            enable_regex: false,
            include_size: false,
            include_date_created: false,
            include_date_modified: false,
            include_date_accessed: false,
            include_run_count: false,
            sort_asc: true,
            sort_by: SortBy::Name,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SearchDefaults {
    /// Defaults as a caller-style option map
    pub fn to_options_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(keys::OFFSET.into(), self.offset.into());
        map.insert(keys::LIMIT.into(), self.limit.into());
        map.insert(keys::MATCH_CASE.into(), self.match_case.into());
        map.insert(keys::MATCH_WHOLE_WORD.into(), self.match_whole_word.into());
        map.insert(keys::MATCH_PATH.into(), self.match_path.into());
        map.insert(keys::ENABLE_REGEX.into(), self.enable_regex.into());
        map.insert(keys::INCLUDE_SIZE.into(), self.include_size.into());
        map.insert(keys::INCLUDE_DATE_CREATED.into(), self.include_date_created.into());
        map.insert(keys::INCLUDE_DATE_MODIFIED.into(), self.include_date_modified.into());
        map.insert(keys::INCLUDE_DATE_ACCESSED.into(), self.include_date_accessed.into());
        map.insert(keys::INCLUDE_RUN_COUNT.into(), self.include_run_count.into());
        map.insert(keys::SORT_ASC.into(), self.sort_asc.into());
        map.insert(keys::SORT_BY.into(), self.sort_by.as_str().into());
        map
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "search-bridge", "search-bridge") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("search-bridge.toml")
        }
    }

    /// Load configuration from `path` (or the default location).
    ///
    /// A missing file yields the defaults; it is not created here.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?
        } else {
            Config::default()
        };

        config.config_path = config_path;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let content = self.to_toml()?;

        // Ensure parent directory exists
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
            }
        }

        fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", self.config_path))?;

        info!("Configuration saved to {:?}", self.config_path);
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_bridge_core::SearchOptions;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.search, SearchDefaults::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.config_path, path);
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nlimit = 5\nsort_by = \"dateModified\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.search.sort_by, SortBy::DateModified);
        assert!(config.search.sort_asc);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            config_path: dir.path().join("nested").join("config.toml"),
            ..Default::default()
        };
        config.search.include_size = true;
        config.logging.level = "debug".to_string();
        config.save().unwrap();

        let loaded = Config::load(Some(&config.config_path)).unwrap();
        assert_eq!(loaded.search, config.search);
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search\nlimit = ").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_defaults_translate_like_wrapper() {
        let options = SearchOptions::from_map(&SearchDefaults::default().to_options_map());
        assert_eq!(options.limit, Some(100));
        assert!(options.sort_asc);
        assert_eq!(options.sort_by, SortBy::Name);
        assert!(!options.include_size);
    }
}
