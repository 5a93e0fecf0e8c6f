//! Default paths and persistent settings

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Normalizer used when neither the command line nor the settings name one
pub const DEFAULT_INPUT_DICT: &str = "simple";

/// Get the configuration directory for dict-translate
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base.join("dict-translate"))
}

/// Default directory for bare dictionary names
pub fn default_data_dir() -> Result<PathBuf> {
    Ok(config_dir()?.join("tsearch_data"))
}

/// Get the config file path with optional override
pub fn config_file_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("config.json")),
    }
}

/// User configuration stored in config file
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PersistentConfig {
    /// Directory bare dictionary names resolve against
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Default upstream normalizer
    #[serde(default)]
    pub input_dict: Option<String>,
}

impl PersistentConfig {
    /// Load configuration, returning defaults if the file does not exist
    pub fn load_from(custom_path: Option<&Path>) -> Result<Self> {
        let path = config_file_path(custom_path)?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration
    pub fn save_to(&self, custom_path: Option<&Path>) -> Result<()> {
        let path = config_file_path(custom_path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Data directory, command line first, then settings, then the default
    pub fn resolve_data_dir(&self, cli_data_dir: Option<PathBuf>) -> Result<PathBuf> {
        match cli_data_dir.or_else(|| self.data_dir.clone()) {
            Some(dir) => Ok(dir),
            None => default_data_dir(),
        }
    }

    /// Upstream normalizer, command line first, then settings, then `simple`
    pub fn resolve_input_dict(&self, cli_input_dict: Option<String>) -> String {
        cli_input_dict
            .or_else(|| self.input_dict.clone())
            .unwrap_or_else(|| DEFAULT_INPUT_DICT.to_string())
    }
}
