//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SHOULD_I_SLEEP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use should_i_sleep::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History keeps {} entries", config.storage.history_limit);
//! ```

mod app;
mod error;
mod features;
mod storage;

pub use app::{AppSettings, Environment, LogFormat};
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub app: AppSettings,

    /// Storage backend and history size
    #[serde(default)]
    pub storage: StorageConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SHOULD_I_SLEEP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SHOULD_I_SLEEP__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    /// - `SHOULD_I_SLEEP__APP__LOG_FORMAT=json` -> `app.log_format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SHOULD_I_SLEEP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.app.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.app.is_production()
    }

    /// Whether error output may include debug details.
    ///
    /// Production never shows them, whatever `verbose_errors` says.
    pub fn show_error_details(&self) -> bool {
        self.features.verbose_errors && !self.is_production()
    }
}
