//! Configuration management for pantry.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::DataFiles;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "pantry";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "PANTRY_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PANTRY_`, sections separated by `__`)
/// 2. TOML config file at `~/.config/pantry/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file configuration.
    pub storage: StorageConfig,
    /// Cookbook configuration.
    pub cookbook: CookbookConfig,
    /// Terminal output configuration.
    pub display: DisplayConfig,
}

/// Data file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the data files.
    /// Defaults to `~/.local/share/pantry`
    pub data_dir: Option<PathBuf>,
    /// File name of the ingredient store.
    pub ingredients_file: String,
    /// File name of the recipe store.
    pub recipes_file: String,
}

/// Cookbook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookbookConfig {
    /// Name shown for the cookbook.
    pub name: String,
}

/// Terminal output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Highlight expired goods and suggestions with ANSI colours.
    pub color: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Will be resolved to default at runtime
            ingredients_file: "ingredients.txt".to_string(),
            recipes_file: "recipes.txt".to_string(),
        }
    }
}

impl Default for CookbookConfig {
    fn default() -> Self {
        Self {
            name: "MyCookBook".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML layer from
    /// `config_path` or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("ingredients_file", &self.storage.ingredients_file),
            ("recipes_file", &self.storage.recipes_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must not be empty"),
                });
            }
        }

        if self.storage.ingredients_file == self.storage.recipes_file {
            return Err(Error::ConfigValidation {
                message: format!(
                    "ingredients_file and recipes_file must differ (both are '{}')",
                    self.storage.recipes_file
                ),
            });
        }

        if self.cookbook.name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "cookbook name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the ingredient file path.
    #[must_use]
    pub fn ingredients_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.ingredients_file)
    }

    /// Get the recipe file path.
    #[must_use]
    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.recipes_file)
    }

    /// Resolve both data file paths.
    #[must_use]
    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            ingredients: self.ingredients_path(),
            recipes: self.recipes_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.storage.ingredients_file, "ingredients.txt");
        assert_eq!(config.storage.recipes_file, "recipes.txt");
        assert_eq!(config.cookbook.name, "MyCookBook");
        assert!(config.display.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_file_name() {
        let mut config = Config::default();
        config.storage.recipes_file = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("recipes_file"));
    }

    #[test]
    fn test_validate_same_file_names() {
        let mut config = Config::default();
        config.storage.recipes_file = "ingredients.txt".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must differ"));
    }

    #[test]
    fn test_validate_empty_cookbook_name() {
        let mut config = Config::default();
        config.cookbook.name = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_dir_default() {
        let config = Config::default();
        assert!(config.data_dir().to_string_lossy().contains("pantry"));
    }

    #[test]
    fn test_data_paths_custom_dir() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/custom/pantry"));

        let files = config.data_files();
        assert_eq!(files.ingredients, PathBuf::from("/custom/pantry/ingredients.txt"));
        assert_eq!(files.recipes, PathBuf::from("/custom/pantry/recipes.txt"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("pantry"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.cookbook, CookbookConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/srv/kitchen\"\nrecipes_file = \"book.txt\"\n\n\
             [display]\ncolor = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/kitchen")));
        assert_eq!(config.storage.recipes_file, "book.txt");
        assert_eq!(config.storage.ingredients_file, "ingredients.txt");
        assert!(!config.display.color);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nrecipes_file = \"ingredients.txt\"\n").unwrap();

        assert!(Config::load_from(Some(path)).is_err());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("ingredients_file"));
        assert!(json.contains("color"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"recipes_file": "book.txt"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.recipes_file, "book.txt");
        assert_eq!(storage.ingredients_file, "ingredients.txt");
    }
}
