//! # Domain Types
//!
//! Every value the pricing engine consumes or produces.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INPUTS (borrowed)                       OUTPUT (owned)                 │
//! │                                                                         │
//! │  PricingRequest                          Breakdown                      │
//! │  ├── cart: Vec<ItemSelection>            ├── line_items: Vec<LineItem>  │
//! │  │         └── custom_art_assets         ├── subtotal / discounts       │
//! │  ├── fulfillment: FulfillmentRequest     ├── total                      │
//! │  ├── promo: Option<PromoInput>           ├── estimated_completion_*     │
//! │  └── admin_discount: Money               ├── summary: Vec<ItemSummary>  │
//! │                                          └── fulfillment                │
//! │  CatalogShape          (via Catalog)                                    │
//! │  DeliveryMethodConfig  (table snapshot)                                 │
//! │    └── SpeedOption                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are transient: built per call, never mutated in place.
//! JSON shapes are camelCase and TypeScript bindings are exported with
//! `ts-rs`, so the ordering UI renders exactly what the engine returns.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cart Input
// =============================================================================

/// One uploaded asset attached to a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomArtAsset {
    /// Upload identifier, when the asset has already been persisted.
    pub id: Option<String>,

    /// Original file name.
    pub file_name: Option<String>,

    /// The payload (data URL, base64 or storage URL). Never empty.
    pub data: String,
}

impl CustomArtAsset {
    /// Wraps a bare payload.
    pub fn from_data(data: impl Into<String>) -> Self {
        CustomArtAsset {
            id: None,
            file_name: None,
            data: data.into(),
        }
    }
}

/// One configurable product instance in the cart, after normalization.
///
/// ## Invariants
/// - `shape_id` is non-blank
/// - `quantity >= 1`
/// - `name`, `description`, `notes` are trimmed and never `Some("")`
/// - every asset in `custom_art_assets` has a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemSelection {
    /// Opaque identifier; `None` for selections not yet persisted.
    pub id: Option<String>,

    /// Key into the shape catalog.
    pub shape_id: String,

    /// Number of sets ordered.
    pub quantity: u32,

    /// Customer-facing label for this set.
    pub name: Option<String>,

    /// Free-text customization request. A non-empty description means the
    /// set needs custom artwork.
    pub description: Option<String>,

    /// Uploaded artwork, in upload order.
    #[serde(default)]
    pub custom_art_assets: Vec<CustomArtAsset>,

    /// Free-text notes for the maker.
    pub notes: Option<String>,
}

impl ItemSelection {
    /// Creates a plain selection of one set with no customization.
    pub fn new(shape_id: impl Into<String>) -> Self {
        ItemSelection {
            id: None,
            shape_id: shape_id.into(),
            quantity: 1,
            name: None,
            description: None,
            custom_art_assets: Vec::new(),
            notes: None,
        }
    }

    /// Builder-style quantity setter. Zero is bumped to one.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style display-name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style asset append.
    pub fn with_asset(mut self, asset: CustomArtAsset) -> Self {
        self.custom_art_assets.push(asset);
        self
    }

    /// Whether this set carries the custom-art setup fee.
    ///
    /// Uploaded artwork or a written customization request both count.
    pub fn requires_custom_art(&self) -> bool {
        !self.custom_art_assets.is_empty()
            || self.description.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// The customer's requested delivery method and speed.
///
/// Either part may be missing or unknown; the resolver falls back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRequest {
    pub method: Option<String>,
    pub speed: Option<String>,
}

impl FulfillmentRequest {
    /// Request a specific method and speed.
    pub fn new(method: impl Into<String>, speed: impl Into<String>) -> Self {
        FulfillmentRequest {
            method: Some(method.into()),
            speed: Some(speed.into()),
        }
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// A promotion attached to the order.
///
/// Two shapes exist in the wild: promos already checked by the promo
/// validation service, and bare legacy codes typed by the customer that are
/// matched against the fixed legacy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PromoInput {
    /// A promo that the validation service accepted.
    Validated {
        /// Flat discount amount. Clamped to the running subtotal.
        discount: Money,
        description: Option<String>,
        code: Option<String>,
    },

    /// A bare code, matched case-insensitively against the legacy table.
    LegacyCode { code: String },
}

impl PromoInput {
    /// Convenience constructor for a validated flat discount.
    pub fn validated(discount: Money) -> Self {
        PromoInput::Validated {
            discount,
            description: None,
            code: None,
        }
    }

    /// Convenience constructor for a legacy code.
    pub fn legacy(code: impl Into<String>) -> Self {
        PromoInput::LegacyCode { code: code.into() }
    }
}

/// Everything the customer (and an operator) chose, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[serde(default)]
    pub cart: Vec<ItemSelection>,

    #[serde(default)]
    pub fulfillment: FulfillmentRequest,

    #[serde(default)]
    pub promo: Option<PromoInput>,

    /// Operator override. Treated as zero when negative.
    #[serde(default)]
    pub admin_discount: Money,
}

// =============================================================================
// Catalog & Delivery Configuration
// =============================================================================

/// A catalog-defined product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogShape {
    pub id: String,
    pub name: String,
    /// Unit price of one plain set, in cents. Non-negative.
    pub base_price: Money,
}

impl CatalogShape {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: Money) -> Self {
        CatalogShape {
            id: id.into(),
            name: name.into(),
            base_price,
        }
    }
}

/// A turnaround option within a delivery method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SpeedOption {
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Surcharge for this speed, on top of the method's base fee.
    pub fee: Money,

    /// Days from today until the order is ready.
    pub days: u32,

    #[serde(default)]
    pub tagline: String,
}

/// One fulfillment channel (pickup, local delivery, shipping, ...).
///
/// ## Invariants
/// - `speed_options` is non-empty
/// - `default_speed` is a key of `speed_options`
///
/// Both are checked by [`crate::validation::validate_delivery_method`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethodConfig {
    pub id: String,
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Flat fee for the method itself. May be zero.
    #[serde(default)]
    pub base_fee: Money,

    pub speed_options: BTreeMap<String, SpeedOption>,

    pub default_speed: String,
}

impl DeliveryMethodConfig {
    /// Looks up a speed tier by id.
    pub fn speed(&self, speed_id: &str) -> Option<&SpeedOption> {
        self.speed_options.get(speed_id)
    }
}

// =============================================================================
// Breakdown Output
// =============================================================================

/// One signed entry in the itemized breakdown.
///
/// Ids are reconciliation tokens (`set_0`, `delivery`, `promo`,
/// `admin_discount`), never used for computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub label: String,
    /// Negative for discounts.
    pub amount: Money,
}

impl LineItem {
    /// Line id of the fulfillment fee.
    pub const DELIVERY_ID: &'static str = "delivery";
    /// Line id of the promo discount.
    pub const PROMO_ID: &'static str = "promo";
    /// Line id of the operator discount.
    pub const ADMIN_DISCOUNT_ID: &'static str = "admin_discount";

    pub fn new(id: impl Into<String>, label: impl Into<String>, amount: Money) -> Self {
        LineItem {
            id: id.into(),
            label: label.into(),
            amount,
        }
    }

    /// The id of the item line for the selection at `index` in the cart.
    pub fn set_id(index: usize) -> String {
        format!("set_{}", index)
    }

    /// Whether this line reduces the total.
    pub fn is_discount(&self) -> bool {
        self.amount.is_negative()
    }
}

/// Per-selection detail mirrored next to the line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    /// Id of the matching line item (`set_<index>`).
    pub line_id: String,
    pub selection_id: Option<String>,
    pub shape_id: String,
    pub shape_name: String,
    /// Customer label, or "<shape name> Set".
    pub display_name: String,
    pub quantity: u32,
    /// Base price plus the custom-art fee when it applies.
    pub unit_price: Money,
    pub line_subtotal: Money,
    pub requires_custom_art: bool,
    pub custom_art_count: u32,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// The delivery method and speed actually charged, after fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFulfillment {
    pub method_id: String,
    pub method_label: String,
    pub speed_id: String,
    pub speed_label: String,
    /// Base fee plus speed fee, before the empty-cart waiver.
    pub fee: Money,
    pub days: u32,
}

/// The complete pricing result.
///
/// ## Invariants
/// - `total == subtotal - discounts`
/// - `discounts` equals the summed magnitude of the negative line items
/// - `total >= 0`
///
/// ## Units
/// Every amount here is [`Money`], which serializes as integer cents:
/// `"total": 3600` is $36.00. This is not the unit loose request JSON uses.
/// The `discount` and `adminDiscount` fields a client sends are major units
/// (`100` is $100.00) and are converted by [`crate::normalize`]. A client
/// that echoes a breakdown amount back as a discount must divide by 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub line_items: Vec<LineItem>,
    /// Sum of item and delivery lines, before discounts.
    pub subtotal: Money,
    /// Total of all discounts actually applied (positive number).
    pub discounts: Money,
    pub total: Money,
    pub estimated_completion_days: u32,
    #[ts(as = "String")]
    pub estimated_completion_date: NaiveDate,
    pub summary: Vec<ItemSummary>,
    pub fulfillment: ResolvedFulfillment,
}

impl Breakdown {
    /// Finds a line item by id.
    pub fn line(&self, id: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|l| l.id == id)
    }

    /// Sum of the magnitudes of all discount lines.
    pub fn discount_line_total(&self) -> Money {
        self.line_items
            .iter()
            .filter(|l| l.is_discount())
            .map(|l| l.amount.abs())
            .sum()
    }

    /// Checks the three breakdown invariants.
    pub fn is_consistent(&self) -> bool {
        self.total == self.subtotal - self.discounts
            && self.discounts == self.discount_line_total()
            && !self.total.is_negative()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_custom_art() {
        let plain = ItemSelection::new("almond");
        assert!(!plain.requires_custom_art());

        let described = ItemSelection::new("almond").with_description("gold flakes");
        assert!(described.requires_custom_art());

        let with_art = ItemSelection::new("almond").with_asset(CustomArtAsset::from_data("data:"));
        assert!(with_art.requires_custom_art());

        let blank = ItemSelection::new("almond").with_description("   ");
        assert!(!blank.requires_custom_art());
    }

    #[test]
    fn test_with_quantity_never_zero() {
        assert_eq!(ItemSelection::new("x").with_quantity(0).quantity, 1);
        assert_eq!(ItemSelection::new("x").with_quantity(4).quantity, 4);
    }

    #[test]
    fn test_set_line_id() {
        assert_eq!(LineItem::set_id(0), "set_0");
        assert_eq!(LineItem::set_id(12), "set_12");
    }

    #[test]
    fn test_promo_json_shape() {
        let promo = PromoInput::legacy("WELCOME10");
        let json = serde_json::to_value(&promo).unwrap();
        assert_eq!(json["kind"], "legacyCode");
        assert_eq!(json["code"], "WELCOME10");

        let back: PromoInput = serde_json::from_value(json).unwrap();
        assert_eq!(back, promo);
    }

    #[test]
    fn test_delivery_speed_lookup() {
        let mut speeds = BTreeMap::new();
        speeds.insert(
            "standard".to_string(),
            SpeedOption {
                label: "Standard".to_string(),
                description: String::new(),
                fee: Money::zero(),
                days: 14,
                tagline: String::new(),
            },
        );
        let method = DeliveryMethodConfig {
            id: "pickup".to_string(),
            label: "Pickup".to_string(),
            description: String::new(),
            base_fee: Money::zero(),
            speed_options: speeds,
            default_speed: "standard".to_string(),
        };
        assert_eq!(method.speed("standard").map(|s| s.days), Some(14));
        assert!(method.speed("rush").is_none());
    }
}
