//! Configuration file handling
//!
//! Settings live in `~/.carbontrack/config.toml`. A missing file means
//! defaults; a file that exists but does not parse is an error.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::dashboard_client::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::services::normalizer::DEFAULT_CATEGORIES;
use crate::services::Normalizer;
use crate::types::{CarbontrackError, Result, FALLBACK_CATEGORY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Bucket for missing or unrecognized categories
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    /// Footprint categories recognized in addition to the built-in ones
    #[serde(default)]
    pub extra_categories: Vec<String>,

    /// Previous period total (kg CO2) used for the trend in `summary`
    #[serde(default = "default_previous_period_emissions")]
    pub previous_period_emissions: f64,

    /// Rows shown by `activities` when no --limit is given
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout_secs(),
            fallback_category: default_fallback_category(),
            extra_categories: Vec::new(),
            previous_period_emissions: default_previous_period_emissions(),
            activity_limit: default_activity_limit(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_fallback_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

fn default_previous_period_emissions() -> f64 {
    300.0
}

fn default_activity_limit() -> usize {
    10
}

impl Config {
    /// Default config path (~/.carbontrack/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| CarbontrackError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs
            .home_dir()
            .join(".carbontrack")
            .join("config.toml"))
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CarbontrackError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.fallback_category.trim().is_empty() {
            return Err(CarbontrackError::Config(
                "fallback_category must not be empty".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CarbontrackError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if !self.previous_period_emissions.is_finite() || self.previous_period_emissions < 0.0 {
            return Err(CarbontrackError::Config(
                "previous_period_emissions must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Footprint normalizer for the configured category set
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::with_categories(
            DEFAULT_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .chain(self.extra_categories.iter().cloned()),
            &self.fallback_category,
        )
    }

    /// Serialized default configuration
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| CarbontrackError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Write the default configuration to `path`; refuses to overwrite
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(CarbontrackError::Config(format!(
                "{} already exists",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = Self::default_toml()?;
        fs::write(path, content)?;
        Ok(())
    }
}
