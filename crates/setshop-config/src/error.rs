//! # Config Error Types
//!
//! Error types for loading and saving pricing configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Config Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   File access   │  │    Contents     │  │   Pricing rules         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  LoadFailed     │  │  InvalidConfig  │  │  Pricing(PricingError)  │ │
//! │  │  SaveFailed     │  │  (blank symbol, │  │  (empty delivery table, │ │
//! │  │  NoConfigPath   │  │   duplicates)   │  │   negative fees, ...)   │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant means the same thing to a caller: pricing is unavailable
//! until the configuration is fixed.

use setshop_core::{PricingError, ValidationError};
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error covering file, parse and rule failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the config file.
    #[error("Failed to load pricing config: {0}")]
    LoadFailed(String),

    /// Failed to serialize or write the config file.
    #[error("Failed to save pricing config: {0}")]
    SaveFailed(String),

    /// Neither an explicit path nor a platform config directory exists.
    #[error("No pricing config path available")]
    NoConfigPath,

    /// Structurally valid TOML with unusable values.
    #[error("Invalid pricing config: {0}")]
    InvalidConfig(String),

    /// The catalog, delivery table or settings break a pricing rule.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Pricing(PricingError::Validation(err))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}
