//! # setshop-config: Pricing Configuration
//!
//! The catalog provider and delivery configuration provider for
//! `setshop-core`. Owns every file and environment read so the engine
//! never has to.
//!
//! ## Usage
//! ```rust,no_run
//! use setshop_config::PricingConfig;
//!
//! let config = PricingConfig::load(None).expect("pricing unavailable");
//! let catalog = config.catalog();
//! let delivery = config.delivery_methods();
//! let settings = config.to_settings();
//! # let _ = (catalog, delivery, settings);
//! ```

pub mod config;
pub mod error;

pub use config::{
    DeliveryMethodEntry, PricingConfig, SettingsSection, ShapeEntry, SpeedEntry, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult};
