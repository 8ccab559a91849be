//! # Input Normalization
//!
//! Turns the loosely-typed records the ordering UI sends into well-formed
//! domain values. Nothing in here ever fails.
//!
//! ## Why Not Reject Bad Input?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The cart is re-priced on every keystroke:                              │
//! │                                                                         │
//! │  Customer types quantity "1" → "" → "12"                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_cart() ← THIS MODULE                                        │
//! │       │                                                                 │
//! │       ├── ""    → quantity 1   (not an error toast)                    │
//! │       ├── "12"  → quantity 12                                          │
//! │       └── no shapeId → record dropped                                  │
//! │                                                                         │
//! │  Every malformed field degrades to its minimal valid form.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Units
//! Monetary amounts in loose input (promo `discount`, `adminDiscount`) are
//! major units, as the UI shows them: `100` means $100.00. They are converted
//! to [`Money`] cents here, rounding half-up to the cent.

use serde_json::{Map, Value};
use tracing::debug;

use crate::money::Money;
use crate::types::{CustomArtAsset, FulfillmentRequest, ItemSelection, PricingRequest, PromoInput};

/// Field names under which an uploaded asset may carry its payload.
const ASSET_PAYLOAD_FIELDS: &[&str] = &["data", "dataUrl", "data_url", "base64", "url", "payload"];

// =============================================================================
// Field Helpers
// =============================================================================

/// First present, non-null field among `names`.
fn field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|value| !value.is_null())
}

/// Reads a value as a number the way a form field would: JSON numbers and
/// numeric strings count, everything else does not.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Trims a text field. Blank or non-string values are absent.
pub fn clean_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Reads an identifier. Strings are trimmed; numbers are stringified.
fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        other => clean_text(Some(other)),
    }
}

// =============================================================================
// Scalar Coercions
// =============================================================================

/// Coerces a quantity to `max(1, floor(n))`.
///
/// ## Rules
/// - Numbers and numeric strings are floored
/// - Anything below 1 becomes 1
/// - Missing, non-numeric, NaN or infinite values become 1
/// - Values past `u32::MAX` saturate
///
/// ```rust
/// use serde_json::json;
/// use setshop_core::normalize::coerce_quantity;
///
/// assert_eq!(coerce_quantity(Some(&json!(2.9))), 2);
/// assert_eq!(coerce_quantity(Some(&json!(-3))), 1);
/// assert_eq!(coerce_quantity(Some(&json!("abc"))), 1);
/// assert_eq!(coerce_quantity(None), 1);
/// ```
pub fn coerce_quantity(value: Option<&Value>) -> u32 {
    let Some(n) = value.and_then(numeric) else {
        return 1;
    };
    let floored = n.floor();
    if floored < 1.0 {
        1
    } else if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

/// Converts a major-unit amount (`12.5` = $12.50) to cents.
///
/// Rounds half-up to the cent for non-negative amounts. Returns `None` for
/// non-numeric input.
pub fn money_from_major(value: &Value) -> Option<Money> {
    if let Value::Number(n) = value {
        if let Some(whole) = n.as_i64() {
            return Some(Money::from_cents(whole.saturating_mul(100)));
        }
    }
    let cents = (numeric(value)? * 100.0).round();
    Some(Money::from_cents(cents.clamp(i64::MIN as f64, i64::MAX as f64) as i64))
}

// =============================================================================
// Cart Normalization
// =============================================================================

/// Normalizes one custom-art entry.
///
/// ## Accepted Shapes
/// - a non-empty string: the payload itself
/// - an object with a non-empty payload under `data`, `dataUrl`,
///   `base64`, `url` or `payload`, plus optional `id` and
///   `fileName`/`file_name`/`name`
///
/// Anything else (nulls, numbers, objects without a payload) is discarded.
pub fn normalize_asset(entry: &Value) -> Option<CustomArtAsset> {
    match entry {
        Value::String(payload) if !payload.trim().is_empty() => {
            Some(CustomArtAsset::from_data(payload.clone()))
        }
        Value::Object(object) => {
            let data = ASSET_PAYLOAD_FIELDS
                .iter()
                .filter_map(|name| object.get(*name))
                .find_map(|value| match value {
                    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                    _ => None,
                })?;
            Some(CustomArtAsset {
                id: identifier(object.get("id")),
                file_name: clean_text(field(object, &["fileName", "file_name", "name"])),
                data,
            })
        }
        _ => None,
    }
}

/// Normalizes one cart record. `None` when it has no usable shape id.
pub fn normalize_selection(record: &Value) -> Option<ItemSelection> {
    let object = record.as_object()?;
    let shape_id = identifier(field(object, &["shapeId", "shape_id"]))?;

    let custom_art_assets = match field(object, &["customArtAssets", "custom_art_assets"]) {
        Some(Value::Array(entries)) => entries.iter().filter_map(normalize_asset).collect(),
        _ => Vec::new(),
    };

    Some(ItemSelection {
        id: identifier(object.get("id")),
        shape_id,
        quantity: coerce_quantity(object.get("quantity")),
        name: clean_text(object.get("name")),
        description: clean_text(object.get("description")),
        custom_art_assets,
        notes: clean_text(object.get("notes")),
    })
}

/// Normalizes a raw cart, dropping records without a shape id.
///
/// Order is preserved, so the index of a selection in the result is stable
/// for line-item ids.
pub fn normalize_cart(records: &[Value]) -> Vec<ItemSelection> {
    let cart: Vec<ItemSelection> = records.iter().filter_map(normalize_selection).collect();
    let dropped = records.len() - cart.len();
    if dropped > 0 {
        debug!(dropped, kept = cart.len(), "Dropped cart records without a shape id");
    }
    cart
}

// =============================================================================
// Promo, Admin Discount, Fulfillment
// =============================================================================

/// Classifies a loose promo value.
///
/// ## Rules
/// - `{ valid: true, discount: n, ... }` → [`PromoInput::Validated`]
///   (negative discounts become zero)
/// - a non-blank string → [`PromoInput::LegacyCode`]
/// - anything else (`valid: false`, missing discount, null, numbers) → `None`
///
/// ```rust
/// use serde_json::json;
/// use setshop_core::normalize::normalize_promo;
/// use setshop_core::PromoInput;
///
/// assert_eq!(normalize_promo(&json!("welcome10")), Some(PromoInput::legacy("welcome10")));
/// assert_eq!(normalize_promo(&json!({"valid": false, "discount": 5})), None);
/// ```
pub fn normalize_promo(value: &Value) -> Option<PromoInput> {
    match value {
        Value::String(code) => {
            let code = code.trim();
            (!code.is_empty()).then(|| PromoInput::legacy(code))
        }
        Value::Object(object) => {
            if object.get("valid") != Some(&Value::Bool(true)) {
                return None;
            }
            let discount = money_from_major(object.get("discount")?)?.non_negative();
            Some(PromoInput::Validated {
                discount,
                description: clean_text(field(object, &["discountDescription", "description"])),
                code: clean_text(object.get("code")),
            })
        }
        _ => None,
    }
}

/// Coerces an operator discount: absent, negative or non-numeric → zero.
pub fn normalize_admin_discount(value: Option<&Value>) -> Money {
    value
        .and_then(money_from_major)
        .map(Money::non_negative)
        .unwrap_or_default()
}

/// Reads `{ method, speed }`. Non-objects yield an empty request.
pub fn normalize_fulfillment(value: &Value) -> FulfillmentRequest {
    let Some(object) = value.as_object() else {
        return FulfillmentRequest::default();
    };
    FulfillmentRequest {
        method: identifier(field(object, &["method", "deliveryMethod", "delivery_method"])),
        speed: identifier(field(object, &["speed", "deliverySpeed", "delivery_speed"])),
    }
}

/// Normalizes a whole loose quote request.
///
/// ## Accepted Shape
/// ```json
/// {
///   "cart": [{ "shapeId": "almond", "quantity": 2 }],
///   "fulfillment": { "method": "pickup", "speed": "standard" },
///   "promo": "WELCOME10",
///   "adminDiscount": 5
/// }
/// ```
/// `items` is accepted for `cart`; `promoCode` for `promo`; and
/// `deliveryMethod`/`deliverySpeed` at the top level when `fulfillment` is
/// absent.
pub fn normalize_request(value: &Value) -> PricingRequest {
    let Some(object) = value.as_object() else {
        return PricingRequest::default();
    };

    let cart = match field(object, &["cart", "items"]) {
        Some(Value::Array(records)) => normalize_cart(records),
        _ => Vec::new(),
    };

    let fulfillment = match object.get("fulfillment") {
        Some(inner @ Value::Object(_)) => normalize_fulfillment(inner),
        _ => normalize_fulfillment(value),
    };

    PricingRequest {
        cart,
        fulfillment,
        promo: field(object, &["promo", "promoCode", "promo_code"]).and_then(normalize_promo),
        admin_discount: normalize_admin_discount(field(object, &["adminDiscount", "admin_discount"])),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
