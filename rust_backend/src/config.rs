//! Application configuration file support.
//!
//! Settings are read from a TOML file, `sting.toml` by default. Every section
//! is optional:
//!
//! ```toml
//! [export]
//! file_stem = "mission_sting"
//! json_indent = 2
//!
//! [chart]
//! title = "Répartition du temps par catégorie"
//! palette = ["#003ea5", "#ffcb05", "#e8b900", "#999999"]
//!
//! # Replaces the built-in catalog when present
//! [[catalog]]
//! Nom = "Portail"
//! Temps = 5
//! "Catégorie" = "contractualisation"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::catalog::Catalog;
use crate::core::domain::BlockDefinition;
use crate::mission::chart::{DEFAULT_PALETTE, DEFAULT_TITLE};
use crate::parsing::json_parser::DEFAULT_JSON_INDENT;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "sting.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("No sting.toml found in standard locations")]
    NotFound,

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    /// Custom catalog; the built-in one is used when empty.
    #[serde(default)]
    pub catalog: Vec<BlockDefinition>,
}

/// Export file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,
}

/// Bar chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_chart_title")]
    pub title: String,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_file_stem() -> String {
    "mission_sting".to_string()
}

fn default_json_indent() -> usize {
    DEFAULT_JSON_INDENT
}

fn default_chart_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_stem: default_file_stem(),
            json_indent: default_json_indent(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: default_chart_title(),
            palette: default_palette(),
        }
    }
}

impl AppConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let deserializer = toml::Deserializer::new(content);
        let config: AppConfig =
            serde_path_to_error::deserialize(deserializer).map_err(|e| ConfigError::Parse {
                path: e.path().to_string(),
                message: e.into_inner().message().to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(ConfigError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `sting.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Like [`AppConfig::from_default_location`], falling back to defaults
    /// when no file exists. Read and parse errors are still reported.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::from_default_location() {
            Err(ConfigError::NotFound) => {
                log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Check value ranges and the custom catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.file_stem.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "'export.file_stem' must not be empty".to_string(),
            ));
        }
        if self.export.file_stem.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "'export.file_stem' must be a bare file name, got '{}'",
                self.export.file_stem
            )));
        }
        if !(1..=8).contains(&self.export.json_indent) {
            return Err(ConfigError::Invalid(format!(
                "'export.json_indent' must be between 1 and 8, got {}",
                self.export.json_indent
            )));
        }
        self.build_catalog().map(|_| ())
    }

    /// The catalog this configuration selects.
    pub fn build_catalog(&self) -> Result<Catalog, ConfigError> {
        if self.catalog.is_empty() {
            return Ok(Catalog::sting());
        }
        Catalog::new(self.catalog.clone()).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
