use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskMasterError};
use crate::helpers::SortKey;
use crate::storage::DEFAULT_DATA_PATH;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Directory of the config file in use; theme files live beside it.
    #[serde(skip)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// "dark" (default), "light", or a theme file name under themes/
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub default_sort: SortKey,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_sort: SortKey::default(),
        }
    }
}

fn default_theme() -> String {
    "dark".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Task file, relative to the working directory unless absolute
    #[serde(default = "default_data_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> String {
    DEFAULT_DATA_PATH.into()
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::default_config_path()?,
        };

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&content)
                .map_err(|e| TaskMasterError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            Config::default()
        };
        config.dir = config_path.parent().map(Path::to_path_buf);

        Ok(config)
    }

    pub fn themes_dir(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join("themes"))
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TaskMasterError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("taskmaster"))
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.general.theme, "dark");
        assert_eq!(config.general.default_sort, SortKey::Insertion);
        assert_eq!(config.storage.path, "data/tasks.json");
        assert_eq!(config.themes_dir(), Some(dir.path().join("themes")));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ndefault_sort = \"due-date\"\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.general.default_sort, SortKey::DueDate);
        assert_eq!(config.general.theme, "dark");
        assert_eq!(config.storage.path, "data/tasks.json");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\ntheme = ").unwrap();

        assert!(matches!(Config::load(Some(path)), Err(TaskMasterError::Config(_))));
    }
}
