//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LAVKA_DATA_DIR` - Directory for the sled database (default:
//!   `./lavka-data`)

use std::path::PathBuf;

use thiserror::Error;

const DATA_DIR_VAR: &str = "LAVKA_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "lavka-data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the durable store lives in.
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = match std::env::var(DATA_DIR_VAR) {
            Ok(value) if value.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    DATA_DIR_VAR.to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(value) => PathBuf::from(value),
            Err(_) => PathBuf::from(DEFAULT_DATA_DIR),
        };

        Ok(Self { data_dir })
    }
}
