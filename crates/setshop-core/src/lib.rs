//! # setshop-core: Order Pricing & Fulfillment Engine
//!
//! Turns a customer's set selections, delivery choice, promo and operator
//! override into an itemized, auditable price breakdown plus a completion
//! date estimate. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SetShop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Ordering UI / Admin back office                 │   │
//! │  │    Cart editor ──► Delivery picker ──► Promo box ──► Checkout   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ loose JSON, re-priced per edit         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ setshop-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   normalize ──► line_items ──► delivery ──► discount ──► pricing│   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • SAME INPUT = SAME BREAKDOWN             │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ catalog, delivery table, settings      │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                 setshop-config (TOML + env)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Selections, delivery config, line items, the breakdown
//! - [`money`] - Integer-cent Money type and the currency formatter
//! - [`normalize`] - Loose JSON → well-formed selections (never fails)
//! - [`catalog`] - Shape lookup trait and an in-memory catalog
//! - [`line_items`] - Per-selection pricing
//! - [`delivery`] - Method/speed resolution and completion date
//! - [`discount`] - Promo then admin discount, clamped
//! - [`pricing`] - The entry points that assemble a [`Breakdown`]
//! - [`validation`] - Configuration integrity checks
//! - [`diagnostics`] - Observer hook for silently dropped selections
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: catalog, delivery table, settings and "today" are
//!    all parameters
//! 2. **Integer Money**: all amounts are cents (i64)
//! 3. **Forgiving Input, Strict Config**: bad cart data is normalized; bad
//!    configuration is a typed error
//! 4. **Fixed Order**: promo before admin discount, enforced here
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use setshop_core::normalize::normalize_request;
//!
//! let request = normalize_request(&json!({
//!     "cart": [{ "shapeId": "almond", "quantity": "abc" }],
//!     "promo": "welcome10",
//!     "adminDiscount": -5
//! }));
//!
//! assert_eq!(request.cart[0].quantity, 1);
//! assert!(request.admin_discount.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod delivery;
pub mod diagnostics;
pub mod discount;
pub mod error;
pub mod line_items;
pub mod money;
pub mod normalize;
pub mod pricing;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, ShapeCatalog};
pub use diagnostics::{NoopObserver, PricingObserver, RecordingObserver};
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_breakdown, compute_breakdown_observed, compute_breakdown_today};
pub use settings::PricingSettings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Setup charge added to the unit price of every custom-art set ($10.00).
pub const DEFAULT_CUSTOM_ART_SETUP_FEE_CENTS: i64 = 1000;

/// Delivery method used when the requested one is missing or unknown.
pub const DEFAULT_DELIVERY_METHOD: &str = "pickup";
