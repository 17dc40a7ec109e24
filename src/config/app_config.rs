use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use super::SelectorConfig;

pub const DEFAULT_CONFIG_PATH: &str = "src/configs/listing_check.toml";
pub const CONFIG_PATH_ENV: &str = "LISTING_CHECK_CONFIG";
pub const ENV_PREFIX: &str = "LISTING_CHECK";

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub scraper: ScraperConfig,
    pub selectors: SelectorConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
}

/// Page fetch behaviour. There are no retries: one attempt per check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub user_agent: Option<String>,
    pub timeout_seconds: u64,
    pub max_reviews: usize,
}

/// Review analysis thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub suspicious_keywords: Vec<String>,
    /// Reviews are considered templated when suspicious mentions exceed this
    pub templated_threshold: usize,
    pub burst_min_dated_reviews: usize,
}

impl AppConfig {
    /// Load from the config file named by `LISTING_CHECK_CONFIG` (or the default
    /// path), layered with `LISTING_CHECK__SECTION__KEY` environment variables.
    /// A missing file falls back to built-in defaults.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(&path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path))?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse configuration from {}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file only, without environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scraper.max_reviews == 0 || self.scraper.max_reviews > 10 {
            anyhow::bail!(
                "scraper.max_reviews must be between 1 and 10, got {}",
                self.scraper.max_reviews
            );
        }
        if self.scraper.timeout_seconds == 0 {
            anyhow::bail!("scraper.timeout_seconds must be positive");
        }
        self.selectors.compile()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/listing_model.bin"),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_seconds: 10,
            max_reviews: 5,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            suspicious_keywords: vec!["great product".to_string(), "very good".to_string()],
            templated_threshold: 2,
            burst_min_dated_reviews: 1,
        }
    }
}
