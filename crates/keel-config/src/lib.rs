//! # keel-config
//!
//! Layered configuration loading for keel using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KEEL_*` prefix, `__` as separator)
//! 2. Project-level `.keel/config.toml`
//! 3. User-level `~/.config/keel/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `KEEL_VALIDATION__COERCE_VALUE` -> `validation.coerce_value`.
//!
//! # Usage
//!
//! ```no_run
//! use keel_config::KeelConfig;
//!
//! let config = KeelConfig::load_with_dotenv().expect("config");
//! let options = config.validation.options();
//! println!("scope {} coercing {}", config.validation.scope, options.coerce_value);
//! ```

mod error;
mod validation;

pub use error::ConfigError;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KeelConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl KeelConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse or a value
    /// has the wrong shape, and `ConfigError::InvalidValue` when a value is
    /// well-formed but unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validation.check()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`]. A missing `.env` is not an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".keel/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("KEEL_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keel").join("config.toml"))
    }
}
