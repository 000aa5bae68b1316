// ABOUTME: Application configuration with defaults and file loading
// Supports TOML configuration files and environment variables

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::pricing::PricingCatalog;
use crate::utils::error::{CostError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub export_format: ExportFormat,
    /// Alternate rate tables (TOML or JSON); the embedded rates are used when unset
    #[serde(default)]
    pub pricing_file: Option<PathBuf>,
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
    Markdown,
}

impl FromStr for ExportFormat {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(CostError::Config(format!(
                "unknown export format '{other}'. Choose one of: text, json, csv, markdown"
            ))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_format: ExportFormat::Text,
            pricing_file: None,
            config_path: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "integration-costs", "integration-costs")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the platform config directory, falling back to defaults,
    /// then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                match Self::read_file(&config_path) {
                    Ok(file_config) => config = file_config,
                    Err(e) => tracing::warn!(
                        "Ignoring unreadable config {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }

        config.apply_env();
        config
    }

    /// Load an explicitly requested config file; unlike [`load`](Self::load)
    /// a missing or malformed file is an error
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::read_file(path.as_ref())?;
        config.apply_env();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(format) = std::env::var("COST_EXPORT_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.export_format = parsed,
                Err(e) => tracing::warn!("Ignoring COST_EXPORT_FORMAT: {}", e),
            }
        }

        if let Ok(path) = std::env::var("COST_PRICING_FILE") {
            if !path.is_empty() {
                self.pricing_file = Some(PathBuf::from(path));
            }
        }
    }

    /// Build the pricing catalog this configuration selects
    pub fn catalog(&self) -> Result<PricingCatalog> {
        match &self.pricing_file {
            Some(path) => {
                tracing::debug!("Loading pricing from {}", path.display());
                PricingCatalog::load_from_file(path)
            }
            None => Ok(PricingCatalog::default()),
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = self
            .config_path
            .clone()
            .or_else(Self::default_path)
            .ok_or_else(|| CostError::Config("no config directory available".to_string()))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CostError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(&config_path, contents)?;

        Ok(config_path)
    }
}
