//! Configuration management for the Pour-Over Brew Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with POUROVER_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{MethodKind, DEFAULT_PRESET_ID};
use crate::storage::PRESETS_STORAGE_KEY;
use crate::types::BrewSettings;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Preset persistence
    pub storage: StorageConfig,

    /// Initial brew selection
    pub brew: BrewDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Key holding the custom preset list
    pub preset_key: String,

    /// Directory used by the file-backed store
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrewDefaults {
    /// Grams of ground coffee
    pub coffee_amount: f64,

    /// X in a 1:X coffee to water ratio
    pub water_ratio: f64,

    /// Brew method id
    pub method: String,

    /// 4:6 preset id
    pub preset: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("POUROVER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (POUROVER_ prefix)
            .add_source(
                Environment::with_prefix("POUROVER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?.build()?.try_deserialize()
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = BrewSettings::default();
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("storage.preset_key", PRESETS_STORAGE_KEY)?
            .set_default("storage.data_dir", "data")?
            .set_default("brew.coffee_amount", defaults.coffee_amount)?
            .set_default("brew.water_ratio", defaults.water_ratio)?
            .set_default("brew.method", MethodKind::FourSix.as_str())?
            .set_default("brew.preset", DEFAULT_PRESET_ID)
    }

    /// Settings for the configured dose and ratio
    pub fn brew_settings(&self) -> BrewSettings {
        BrewSettings::new(self.brew.coffee_amount, self.brew.water_ratio)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preset_key: PRESETS_STORAGE_KEY.to_string(),
            data_dir: "data".to_string(),
        }
    }
}
