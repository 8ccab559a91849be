//! # Pricing Configuration
//!
//! Configuration management for the catalog, the delivery table and the
//! pricing settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SETSHOP_CUSTOM_ART_FEE_CENTS=1200                                  │
//! │     SETSHOP_DEFAULT_DELIVERY_METHOD=local                              │
//! │     SETSHOP_CURRENCY_SYMBOL=€                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/setshop/pricing.toml (Linux)                             │
//! │     ~/Library/Application Support/com.setshop.pricing/pricing.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Sample catalog, pickup/local/shipping, $10.00 custom-art fee       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [settings]
//! custom_art_setup_fee_cents = 1000
//! default_delivery_method = "pickup"
//! currency_symbol = "$"
//!
//! [settings.legacy_codes]
//! WELCOME10 = 1000  # basis points
//!
//! [[shapes]]
//! id = "almond"
//! name = "Almond"
//! base_price_cents = 2000
//!
//! [[delivery_methods]]
//! id = "pickup"
//! label = "Pickup"
//! base_fee_cents = 0
//! default_speed = "standard"
//!
//! [delivery_methods.speed_options.standard]
//! label = "Standard"
//! fee_cents = 0
//! days = 14
//! ```
//!
//! Amounts in the file are integer cents. A section left out of the file
//! keeps its built-in default; a section that is present replaces it whole.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use setshop_core::settings::default_legacy_codes;
use setshop_core::validation::{validate_catalog_shape, validate_delivery_table, validate_settings};
use setshop_core::{
    CatalogShape, DeliveryMethodConfig, Money, PricingSettings, ShapeCatalog, SpeedOption,
    ValidationError, DEFAULT_CUSTOM_ART_SETUP_FEE_CENTS, DEFAULT_DELIVERY_METHOD,
};

use crate::error::{ConfigError, ConfigResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pricing.toml";

/// Environment variable overriding the custom-art setup fee (cents).
pub const ENV_CUSTOM_ART_FEE: &str = "SETSHOP_CUSTOM_ART_FEE_CENTS";

/// Environment variable overriding the default delivery method id.
pub const ENV_DEFAULT_DELIVERY_METHOD: &str = "SETSHOP_DEFAULT_DELIVERY_METHOD";

/// Environment variable overriding the receipt currency symbol.
pub const ENV_CURRENCY_SYMBOL: &str = "SETSHOP_CURRENCY_SYMBOL";

// =============================================================================
// Settings Section
// =============================================================================

/// The `[settings]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    /// Setup charge per custom-art set, in cents.
    #[serde(default = "default_custom_art_fee")]
    pub custom_art_setup_fee_cents: i64,

    /// Method id used when a request names an unknown method.
    #[serde(default = "default_delivery_method")]
    pub default_delivery_method: String,

    /// Symbol used when printing receipts. Not part of pricing.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Legacy promo codes in basis points.
    #[serde(default = "default_legacy_codes")]
    pub legacy_codes: BTreeMap<String, u32>,
}

fn default_custom_art_fee() -> i64 {
    DEFAULT_CUSTOM_ART_SETUP_FEE_CENTS
}

fn default_delivery_method() -> String {
    DEFAULT_DELIVERY_METHOD.to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for SettingsSection {
    fn default() -> Self {
        SettingsSection {
            custom_art_setup_fee_cents: default_custom_art_fee(),
            default_delivery_method: default_delivery_method(),
            currency_symbol: default_currency_symbol(),
            legacy_codes: default_legacy_codes(),
        }
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// One `[[shapes]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeEntry {
    pub id: String,
    pub name: String,
    pub base_price_cents: i64,
}

impl ShapeEntry {
    fn new(id: &str, name: &str, base_price_cents: i64) -> Self {
        ShapeEntry {
            id: id.to_string(),
            name: name.to_string(),
            base_price_cents,
        }
    }

    /// Converts to the engine's shape type.
    pub fn to_shape(&self) -> CatalogShape {
        CatalogShape::new(self.id.clone(), self.name.clone(), Money::from_cents(self.base_price_cents))
    }
}

fn default_shapes() -> Vec<ShapeEntry> {
    vec![
        ShapeEntry::new("almond", "Almond", 2000),
        ShapeEntry::new("coffin", "Coffin", 2500),
        ShapeEntry::new("square", "Square", 1800),
        ShapeEntry::new("oval", "Oval", 1800),
        ShapeEntry::new("stiletto", "Stiletto", 2800),
    ]
}

// =============================================================================
// Delivery Entries
// =============================================================================

/// One `[delivery_methods.speed_options.<id>]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedEntry {
    pub label: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub fee_cents: i64,

    /// Production plus transit days.
    pub days: u32,

    #[serde(default)]
    pub tagline: String,
}

impl SpeedEntry {
    fn new(label: &str, fee_cents: i64, days: u32, tagline: &str) -> Self {
        SpeedEntry {
            label: label.to_string(),
            description: String::new(),
            fee_cents,
            days,
            tagline: tagline.to_string(),
        }
    }

    pub fn to_speed(&self) -> SpeedOption {
        SpeedOption {
            label: self.label.clone(),
            description: self.description.clone(),
            fee: Money::from_cents(self.fee_cents),
            days: self.days,
            tagline: self.tagline.clone(),
        }
    }
}

/// One `[[delivery_methods]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMethodEntry {
    pub id: String,
    pub label: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub base_fee_cents: i64,

    pub default_speed: String,

    #[serde(default)]
    pub speed_options: BTreeMap<String, SpeedEntry>,
}

impl DeliveryMethodEntry {
    pub fn to_method(&self) -> DeliveryMethodConfig {
        DeliveryMethodConfig {
            id: self.id.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            base_fee: Money::from_cents(self.base_fee_cents),
            speed_options: self
                .speed_options
                .iter()
                .map(|(id, speed)| (id.clone(), speed.to_speed()))
                .collect(),
            default_speed: self.default_speed.clone(),
        }
    }
}

/// Builds the built-in methods. Every method offers a standard and a rush
/// tier; only the base fee and transit time differ.
fn default_delivery_methods() -> Vec<DeliveryMethodEntry> {
    let method = |id: &str, label: &str, description: &str, base_fee_cents: i64, transit: u32| {
        let mut speed_options = BTreeMap::new();
        speed_options.insert(
            "standard".to_string(),
            SpeedEntry::new("Standard", 0, 14 + transit, "Made to order"),
        );
        speed_options.insert(
            "rush".to_string(),
            SpeedEntry::new("Rush", 1500, 5 + transit, "Jumps the queue"),
        );
        DeliveryMethodEntry {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            base_fee_cents,
            default_speed: "standard".to_string(),
            speed_options,
        }
    };

    vec![
        method("pickup", "Pickup", "Collect from the studio", 0, 0),
        method("local", "Local Delivery", "Hand-delivered within the city", 500, 1),
        method("shipping", "Shipping", "Tracked post", 800, 4),
    ]
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete pricing configuration.
///
/// ## Example TOML
/// ```toml
/// [settings]
/// custom_art_setup_fee_cents = 1200
/// default_delivery_method = "local"
///
/// [[shapes]]
/// id = "coffin"
/// name = "Coffin"
/// base_price_cents = 2500
/// ```
///
/// Leaving out `[[delivery_methods]]` keeps the built-in pickup, local and
/// shipping methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub settings: SettingsSection,

    #[serde(default = "default_shapes")]
    pub shapes: Vec<ShapeEntry>,

    #[serde(default = "default_delivery_methods")]
    pub delivery_methods: Vec<DeliveryMethodEntry>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            settings: SettingsSection::default(),
            shapes: default_shapes(),
            delivery_methods: default_delivery_methods(),
        }
    }
}

impl PricingConfig {
    /// Creates the built-in configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses TOML contents. No environment overrides, no validation.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the platform default location is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::read_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                Some(path) => {
                    debug!(?path, "Pricing config not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        info!(
            shapes = config.shapes.len(),
            delivery_methods = config.delivery_methods.len(),
            "Pricing config ready"
        );
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading pricing config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Runs the same checks the engine runs on every call, plus the ones
    /// only the loader can see (duplicate shape ids, blank currency symbol).
    pub fn validate(&self) -> ConfigResult<()> {
        if self.settings.currency_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "currency_symbol must not be blank".into(),
            ));
        }

        validate_settings(&self.to_settings())?;

        let mut seen = HashSet::with_capacity(self.shapes.len());
        for entry in &self.shapes {
            validate_catalog_shape(&entry.to_shape())?;
            if !seen.insert(entry.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "shape id".to_string(),
                    value: entry.id.clone(),
                }
                .into());
            }
        }
        if self.shapes.is_empty() {
            warn!("Pricing config has no shapes; every selection will be dropped");
        }

        validate_delivery_table(&self.delivery_methods())?;

        let default_method = &self.settings.default_delivery_method;
        if !self.delivery_methods.iter().any(|m| &m.id == default_method) {
            warn!(
                method = %default_method,
                "Default delivery method not in table; first method will be used"
            );
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(fee) = lookup(ENV_CUSTOM_ART_FEE) {
            match fee.trim().parse::<i64>() {
                Ok(cents) => {
                    debug!(cents, "Overriding custom art fee from environment");
                    self.settings.custom_art_setup_fee_cents = cents;
                }
                Err(_) => warn!(value = %fee, "Ignoring unparseable {}", ENV_CUSTOM_ART_FEE),
            }
        }

        if let Some(method) = lookup(ENV_DEFAULT_DELIVERY_METHOD) {
            debug!(method = %method, "Overriding default delivery method from environment");
            self.settings.default_delivery_method = method.trim().to_string();
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.settings.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "setshop", "pricing")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Engine Inputs
    // =========================================================================

    /// The settings passed to every pricing call.
    pub fn to_settings(&self) -> PricingSettings {
        PricingSettings {
            custom_art_setup_fee: Money::from_cents(self.settings.custom_art_setup_fee_cents),
            default_delivery_method: self.settings.default_delivery_method.clone(),
            legacy_codes: self.settings.legacy_codes.clone(),
        }
    }

    /// The shape catalog.
    pub fn catalog(&self) -> ShapeCatalog {
        self.shapes.iter().map(ShapeEntry::to_shape).collect()
    }

    /// The delivery table, in file order.
    pub fn delivery_methods(&self) -> Vec<DeliveryMethodConfig> {
        self.delivery_methods
            .iter()
            .map(DeliveryMethodEntry::to_method)
            .collect()
    }

    /// Returns the receipt currency symbol.
    pub fn currency_symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}
