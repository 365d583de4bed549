//! Configuration management for the curriculum store.
//!
//! This module provides multi-layer configuration support with:
//! - File-based configuration (YAML)
//! - Environment variable overrides
//! - Programmatic updates
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables (`CURRICULUM_*`)
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use curriculum_core::config::{AppConfig, Config, ENV_PREFIX};
//!
//! let config = Config::load("curriculum.yml")?
//!     .with_defaults(&AppConfig::default())?
//!     .with_process_env(ENV_PREFIX);
//!
//! let app = AppConfig::from_config(&config)?;
//! println!("serving {}", app.data_dir.display());
//! # Ok::<(), curriculum_types::CurriculumError>(())
//! ```

use crate::util::data::{deep_merge, get_path, set_path};
use crate::util::fs::expand_path;
use curriculum_types::config::LogConfig;
use curriculum_types::{CurriculumError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CURRICULUM_";

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const LOWEST_FIRST: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Main configuration structure with multi-layer support.
///
/// This is the low-level configuration type. For the typed view the
/// binary consumes, see `AppConfig`.
#[derive(Clone, Debug, Default)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Create an empty configuration with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new configuration from a file path.
    ///
    /// If the file doesn't exist, an empty configuration is created.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(path);
        let mut layers = HashMap::new();

        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            let content = fs::read_to_string(&path)
                .map_err(|e| CurriculumError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

            let value: Value = serde_yaml::from_str(&content)?;

            // An empty file parses as null
            if !value.is_null() {
                layers.insert(ConfigLayer::Loaded, value);
            }
        }

        Ok(Self {
            layers,
            file_path: Some(path),
        })
    }

    /// Install the default layer from any serializable value.
    pub fn with_defaults(mut self, defaults: &impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(defaults)?;
        self.layers.insert(ConfigLayer::Default, value);
        Ok(self)
    }

    /// Install the environment layer from `(name, value)` pairs.
    ///
    /// Only names starting with `prefix` are considered. The remainder is
    /// lowercased and `__` separates nested keys, so `CURRICULUM_LOG__LEVEL`
    /// sets `log.level`. Values are stored as strings; every field reachable
    /// this way deserializes from its string form.
    pub fn with_env_vars<I, K, V>(mut self, prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut layer = Value::Object(Default::default());

        for (name, raw) in vars {
            let Some(key) = name.as_ref().strip_prefix(prefix) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            let key = key.to_lowercase().replace("__", ".");
            set_path(&mut layer, &key, Value::String(raw.as_ref().to_string()));
        }

        self.layers.insert(ConfigLayer::Environment, layer);
        self
    }

    /// Install the environment layer from the process environment.
    pub fn with_process_env(self, prefix: &str) -> Self {
        self.with_env_vars(prefix, std::env::vars())
    }

    /// Get a configuration value by key, respecting layer priority.
    ///
    /// Returns None if the key doesn't exist in any layer.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        for layer in ConfigLayer::LOWEST_FIRST.iter().rev() {
            if let Some(layer_data) = self.layers.get(layer) {
                if let Some(value) = get_path(layer_data, key) {
                    if let Ok(typed_value) = serde_json::from_value(value.clone()) {
                        return Some(typed_value);
                    }
                }
            }
        }

        None
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        set_path(set_layer, key, value);
        Ok(())
    }

    /// Get merged data from all layers.
    pub fn merged_data(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in &ConfigLayer::LOWEST_FIRST {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }

    /// Deserialize the merged layers into a typed configuration.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.merged_data()).map_err(|e| {
            let source = self
                .file_path
                .as_ref()
                .map(|p| format!(" (from {})", p.display()))
                .unwrap_or_default();
            CurriculumError::Config(format!("Invalid configuration{}: {}", source, e))
        })
    }
}

/// Application configuration (`config.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the curriculum data tree
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("curriculum")
}

impl AppConfig {
    /// Build the typed configuration from resolved layers.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut app: AppConfig = config.extract()?;
        app.data_dir = expand_path(&app.data_dir);
        if let Some(path) = app.log.path.take() {
            app.log.path = Some(expand_path(path));
        }
        Ok(app)
    }

    /// Get the default path for the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("curriculum").join("config.yml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curriculum_types::config::LogFormat;
    use curriculum_types::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn test_config_layers() {
        let mut config = Config::new();

        config.layers.insert(
            ConfigLayer::Default,
            serde_json::json!({"key": "default_value"}),
        );

        config.layers.insert(
            ConfigLayer::Loaded,
            serde_json::json!({"key": "loaded_value"}),
        );

        let value: String = config.get("key").unwrap();
        assert_eq!(value, "loaded_value");
    }

    #[test]
    fn test_env_beats_set_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "data_dir: /from/file\nlog:\n  level: WARN\n").unwrap();

        let mut config = Config::load(&path)
            .unwrap()
            .with_defaults(&AppConfig::default())
            .unwrap();
        assert_eq!(config.get::<String>("data_dir").unwrap(), "/from/file");

        config.set("data_dir", "/from/flag").unwrap();
        assert_eq!(config.get::<String>("data_dir").unwrap(), "/from/flag");

        let config = config.with_env_vars(ENV_PREFIX, [("CURRICULUM_DATA_DIR", "/from/env")]);
        let app = AppConfig::from_config(&config).unwrap();
        assert_eq!(app.data_dir, PathBuf::from("/from/env"));
        assert_eq!(app.log.level, LogLevel::Warn);
        assert_eq!(app.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_env_nested_keys_and_unrelated_vars() {
        let config = Config::new()
            .with_defaults(&AppConfig::default())
            .unwrap()
            .with_env_vars(
                ENV_PREFIX,
                [
                    ("CURRICULUM_LOG__FORMAT", "json"),
                    ("CURRICULUM_LOG__LEVEL", "DEBUG"),
                    ("HOME", "/root"),
                ],
            );

        let app = AppConfig::from_config(&config).unwrap();
        assert_eq!(app.log.format, LogFormat::Json);
        assert_eq!(app.log.level, LogLevel::Debug);
        assert!(config.get::<String>("home").is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path().join("absent.yml"))
            .unwrap()
            .with_defaults(&AppConfig::default())
            .unwrap();
        let app = AppConfig::from_config(&config).unwrap();
        assert_eq!(app, AppConfig::default());
    }

    #[test]
    fn test_invalid_value_reports_config_error() {
        let config = Config::new().with_env_vars(ENV_PREFIX, [("CURRICULUM_LOG__LEVEL", "LOUD")]);
        match AppConfig::from_config(&config) {
            Err(CurriculumError::Config(msg)) => assert!(msg.contains("Invalid configuration")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_env_values_keep_their_string_form() {
        let config = Config::new()
            .with_defaults(&AppConfig::default())
            .unwrap()
            .with_env_vars(
                ENV_PREFIX,
                [("CURRICULUM_DATA_DIR", "2024"), ("CURRICULUM_LOG__LEVEL", "debug")],
            );

        let app = AppConfig::from_config(&config).unwrap();
        assert_eq!(app.data_dir, PathBuf::from("2024"));
        assert_eq!(app.log.level, LogLevel::Debug);
    }

    #[test]
    fn test_malformed_yaml_is_a_yaml_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "data_dir: [unclosed\n").unwrap();

        assert!(matches!(Config::load(&path), Err(CurriculumError::Yaml(_))));
    }

    #[test]
    fn test_unserializable_defaults_are_a_json_error() {
        let defaults = std::collections::BTreeMap::from([((1, 2), "tuple key")]);
        assert!(matches!(
            Config::new().with_defaults(&defaults),
            Err(CurriculumError::Json(_))
        ));
    }
}
