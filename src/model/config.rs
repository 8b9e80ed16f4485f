use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::task::Locale;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Task file. Relative paths resolve against the working directory.
    #[serde(default = "default_task_file")]
    pub file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            file: default_task_file(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Language of priority labels written for new tasks
    #[serde(default)]
    pub locale: Locale,
}

fn default_task_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.file, PathBuf::from("tasks.json"));
        assert_eq!(config.display.locale, Locale::English);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[display]\nlocale = \"arabic\"\n").unwrap();
        assert_eq!(config.display.locale, Locale::Arabic);
        assert_eq!(config.storage.file, PathBuf::from("tasks.json"));
    }
}
