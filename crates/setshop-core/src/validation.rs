//! # Validation Module
//!
//! Integrity checks for the configuration the engine is handed.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Validated Where                          │
//! │                                                                         │
//! │  Customer cart (user-editable, changes per keystroke)                  │
//! │  └── NEVER rejected: see `normalize`, bad input degrades to defaults   │
//! │                                                                         │
//! │  Catalog, delivery table, settings (wired by the calling system)       │
//! │  ├── setshop-config: validated once at load time                       │
//! │  └── THIS MODULE: re-checked at the top of every pricing call          │
//! │                                                                         │
//! │  A broken table is an integration bug: fail loudly.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use setshop_core::validation::{validate_price_cents, validate_percentage_bps};
//!
//! assert!(validate_price_cents("base_price", 2000).is_ok());
//! assert!(validate_percentage_bps("WELCOME10", 12_000).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::settings::PricingSettings;
use crate::types::{CatalogShape, DeliveryMethodConfig};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price or fee in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free pickup, promo shapes)
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_percentage_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates one catalog shape.
///
/// ## Rules
/// - `id` and `name` must not be blank
/// - `base_price` must be non-negative
pub fn validate_catalog_shape(shape: &CatalogShape) -> ValidationResult<()> {
    require_non_blank("shape id", &shape.id)?;
    require_non_blank("shape name", &shape.name)?;
    validate_price_cents("base_price", shape.base_price.cents())
}

// =============================================================================
// Delivery Validators
// =============================================================================

/// Validates one delivery method.
///
/// ## Rules
/// - `id` and `label` must not be blank
/// - `base_fee` and every speed fee must be non-negative
/// - At least one speed option
/// - `default_speed` must be one of the speed options
pub fn validate_delivery_method(method: &DeliveryMethodConfig) -> PricingResult<()> {
    require_non_blank("delivery method id", &method.id)?;

    let invalid = |reason: String| PricingError::InvalidDeliveryMethod {
        method: method.id.clone(),
        reason,
    };

    if method.label.trim().is_empty() {
        return Err(invalid("label is required".to_string()));
    }

    if method.base_fee.is_negative() {
        return Err(invalid(format!("base fee {} is negative", method.base_fee)));
    }

    if method.speed_options.is_empty() {
        return Err(invalid("no speed options configured".to_string()));
    }

    for (speed_id, speed) in &method.speed_options {
        if speed.fee.is_negative() {
            return Err(invalid(format!(
                "speed '{}' has negative fee {}",
                speed_id, speed.fee
            )));
        }
    }

    if method.speed(&method.default_speed).is_none() {
        return Err(invalid(format!(
            "default speed '{}' is not one of its speed options",
            method.default_speed
        )));
    }

    Ok(())
}

/// Validates the whole delivery-method table.
///
/// ## Rules
/// - Table must not be empty
/// - Every method passes [`validate_delivery_method`]
/// - Method ids are unique
///
/// ## Example
/// ```rust
/// use setshop_core::validation::validate_delivery_table;
/// use setshop_core::PricingError;
///
/// assert!(matches!(
///     validate_delivery_table(&[]),
///     Err(PricingError::EmptyDeliveryConfig)
/// ));
/// ```
pub fn validate_delivery_table(methods: &[DeliveryMethodConfig]) -> PricingResult<()> {
    if methods.is_empty() {
        return Err(PricingError::EmptyDeliveryConfig);
    }

    let mut seen = HashSet::with_capacity(methods.len());
    for method in methods {
        validate_delivery_method(method)?;
        if !seen.insert(method.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "delivery method id".to_string(),
                value: method.id.clone(),
            }
            .into());
        }
    }

    Ok(())
}

// =============================================================================
// Settings Validators
// =============================================================================

/// Validates pricing settings.
///
/// ## Rules
/// - Custom-art fee must be non-negative
/// - Default delivery method id must not be blank
/// - Every legacy code is non-blank and at most 100%
pub fn validate_settings(settings: &PricingSettings) -> PricingResult<()> {
    if settings.custom_art_setup_fee.is_negative() {
        return Err(PricingError::InvalidSettings(format!(
            "custom art setup fee {} is negative",
            settings.custom_art_setup_fee
        )));
    }

    if settings.default_delivery_method.trim().is_empty() {
        return Err(PricingError::InvalidSettings(
            "default delivery method is required".to_string(),
        ));
    }

    for (code, bps) in &settings.legacy_codes {
        require_non_blank("legacy promo code", code)?;
        validate_percentage_bps(code, *bps)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::money::Money;
    use crate::types::SpeedOption;

    fn speed(fee: i64, days: u32) -> SpeedOption {
        SpeedOption {
            label: "Standard".to_string(),
            description: String::new(),
            fee: Money::from_cents(fee),
            days,
            tagline: String::new(),
        }
    }

    fn method(id: &str) -> DeliveryMethodConfig {
        let mut speed_options = BTreeMap::new();
        speed_options.insert("standard".to_string(), speed(0, 14));
        DeliveryMethodConfig {
            id: id.to_string(),
            label: id.to_uppercase(),
            description: String::new(),
            base_fee: Money::zero(),
            speed_options,
            default_speed: "standard".to_string(),
        }
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents("fee", 0).is_ok());
        assert!(validate_price_cents("fee", 1099).is_ok());
        assert!(validate_price_cents("fee", -100).is_err());
    }

    #[test]
    fn test_validate_percentage_bps() {
        assert!(validate_percentage_bps("code", 0).is_ok());
        assert!(validate_percentage_bps("code", 10_000).is_ok());
        assert!(validate_percentage_bps("code", 10_001).is_err());
    }

    #[test]
    fn test_validate_catalog_shape() {
        assert!(validate_catalog_shape(&CatalogShape::new("almond", "Almond", Money::from_cents(2000))).is_ok());
        assert!(validate_catalog_shape(&CatalogShape::new(" ", "Almond", Money::zero())).is_err());
        assert!(validate_catalog_shape(&CatalogShape::new("a", "A", Money::from_cents(-1))).is_err());
    }

    #[test]
    fn test_empty_table_is_fatal() {
        assert!(matches!(
            validate_delivery_table(&[]),
            Err(PricingError::EmptyDeliveryConfig)
        ));
    }

    #[test]
    fn test_default_speed_must_resolve() {
        let mut broken = method("shipping");
        broken.default_speed = "rush".to_string();
        let err = validate_delivery_table(&[broken]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidDeliveryMethod { ref method, .. } if method == "shipping"));
    }

    #[test]
    fn test_method_without_speeds() {
        let mut broken = method("local");
        broken.speed_options.clear();
        assert!(validate_delivery_method(&broken).is_err());
    }

    #[test]
    fn test_negative_speed_fee() {
        let mut broken = method("local");
        broken
            .speed_options
            .insert("rush".to_string(), speed(-500, 2));
        assert!(validate_delivery_method(&broken).is_err());
    }

    #[test]
    fn test_duplicate_method_ids() {
        let err = validate_delivery_table(&[method("pickup"), method("pickup")]).unwrap_err();
        assert!(matches!(
            err,
            PricingError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_settings() {
        let mut settings = PricingSettings::default();
        assert!(validate_settings(&settings).is_ok());

        settings.legacy_codes.insert("HALFPLUS".to_string(), 15_000);
        assert!(validate_settings(&settings).is_err());

        let mut settings = PricingSettings::default();
        settings.custom_art_setup_fee = Money::from_cents(-1);
        assert!(matches!(
            validate_settings(&settings),
            Err(PricingError::InvalidSettings(_))
        ));
    }
}
