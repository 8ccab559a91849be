//! # Error Types
//!
//! Domain-specific error types for setshop-core.
//!
//! ## What Is (and Is Not) an Error
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pricing Error Taxonomy                               │
//! │                                                                         │
//! │  Malformed cart input          → NOT an error (normalized to defaults) │
//! │    quantity "abc", blank name, art entry with no payload                │
//! │                                                                         │
//! │  Shape missing from catalog    → NOT an error (dropped, observed)      │
//! │                                                                         │
//! │  Broken configuration          → PricingError (fail fast)              │
//! │    empty delivery table, default speed that doesn't resolve            │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → ConfigError → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A configuration fault means the calling system is mis-wired. Callers
//! should show it as "pricing unavailable", never as a $0 order.

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors that stop a breakdown from being computed.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The delivery-method table handed to the engine is empty.
    ///
    /// ## When This Occurs
    /// - The delivery configuration provider failed to load and returned `[]`
    /// - A back-office edit deleted every method
    #[error("Delivery configuration is empty: at least one delivery method is required")]
    EmptyDeliveryConfig,

    /// A delivery method in the table is unusable.
    #[error("Delivery method '{method}' is misconfigured: {reason}")]
    InvalidDeliveryMethod { method: String, reason: String },

    /// Pricing settings are out of range.
    #[error("Invalid pricing settings: {0}")]
    InvalidSettings(String),

    /// The speed tier's day count pushes the completion date past the
    /// calendar range chrono can represent.
    #[error("Completion date out of range: {days} days from {from}")]
    CompletionDateOutOfRange { from: String, days: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation failures for configuration data.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two delivery methods with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::InvalidDeliveryMethod {
            method: "shipping".to_string(),
            reason: "no speed options".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Delivery method 'shipping' is misconfigured: no speed options"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "delivery method id".to_string(),
            value: "pickup".to_string(),
        };
        assert_eq!(err.to_string(), "delivery method id 'pickup' already exists");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let err: PricingError = validation_err.into();
        assert!(matches!(err, PricingError::Validation(_)));
    }
}
