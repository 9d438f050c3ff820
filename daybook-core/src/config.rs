//! daybook configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::classify::{CategoryRule, CategoryRules};
use crate::error::{DaybookError, DaybookResult};
use crate::store::TASKS_FILENAME;

static DEFAULT_DATA_DIR: &str = "~/.daybook";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "DAYBOOK_CONFIG";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Configuration at ~/.config/daybook/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct DaybookConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Ordered keyword rules for the month view. Empty means the built-in set.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            data_dir: default_data_dir(),
            categories: Vec::new(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        Self::config_path_with(std::env::var_os(CONFIG_PATH_ENV))
    }

    /// Config location given the value of `DAYBOOK_CONFIG`, if set.
    fn config_path_with(env_override: Option<std::ffi::OsString>) -> DaybookResult<PathBuf> {
        if let Some(path) = env_override.filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> DaybookResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, writing a commented default file first if none exists.
    /// The file is always read as TOML, whatever its extension.
    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let config: DaybookConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_path().join(TASKS_FILENAME)
    }

    pub fn category_rules(&self) -> CategoryRules {
        CategoryRules::from_config(&self.categories)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        let contents = format!(
            "\
# daybook configuration

# Where tasks.json is kept:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Keyword rules for the month view. The first rule whose keyword appears in
# one of a day's task titles picks that day's marker.
# [[categories]]
# keyword = \"gym\"
# category = \"fitness\"
# marker = \"💪\"
"
        );

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
