//! # Breakdown Assembly
//!
//! The engine entry points. Everything else in the crate is a stage that
//! this module strings together.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate settings + delivery table ──► PricingError on failure        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_item_lines(cart, catalog)       set_0, set_1, ... (or Err)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_delivery(fulfillment, table)  delivery                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ lines so far                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_discounts(promo, admin)         promo?, admin_discount?         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  completion_date(today, speed.days)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Breakdown { lines, subtotal, discounts, total, dates, summary }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! Output depends only on the arguments. `today` is a parameter;
//! [`compute_breakdown_today`] samples the local date exactly once and then
//! delegates.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::catalog::Catalog;
use crate::delivery::{completion_date, delivery_line, resolve_delivery};
use crate::diagnostics::{NoopObserver, PricingObserver};
use crate::discount::apply_discounts;
use crate::error::PricingResult;
use crate::line_items::build_item_lines;
use crate::money::Money;
use crate::settings::PricingSettings;
use crate::types::{Breakdown, DeliveryMethodConfig, PricingRequest};
use crate::validation::{validate_delivery_table, validate_settings};

/// Computes the full price breakdown for a request.
///
/// ## Errors
/// Only configuration faults fail: an empty or inconsistent delivery table,
/// out-of-range settings, or a priced shape with a negative base price.
/// Bad cart data never does.
///
/// ## Example
/// ```rust
/// use std::collections::BTreeMap;
///
/// use chrono::NaiveDate;
/// use setshop_core::{
///     compute_breakdown, CatalogShape, DeliveryMethodConfig, FulfillmentRequest, ItemSelection,
///     Money, PricingRequest, PricingSettings, ShapeCatalog, SpeedOption,
/// };
///
/// let catalog: ShapeCatalog =
///     [CatalogShape::new("almond", "Almond", Money::from_cents(2000))].into_iter().collect();
///
/// let mut speeds = BTreeMap::new();
/// speeds.insert("standard".to_string(), SpeedOption {
///     label: "Standard".to_string(),
///     description: String::new(),
///     fee: Money::zero(),
///     days: 14,
///     tagline: String::new(),
/// });
/// let delivery = vec![DeliveryMethodConfig {
///     id: "pickup".to_string(),
///     label: "Pickup".to_string(),
///     description: String::new(),
///     base_fee: Money::zero(),
///     speed_options: speeds,
///     default_speed: "standard".to_string(),
/// }];
///
/// let request = PricingRequest {
///     cart: vec![ItemSelection::new("almond").with_quantity(2)],
///     fulfillment: FulfillmentRequest::new("pickup", "standard"),
///     ..PricingRequest::default()
/// };
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let breakdown =
///     compute_breakdown(&request, &catalog, &delivery, &PricingSettings::default(), today).unwrap();
///
/// assert_eq!(breakdown.line_items[0].label, "Almond Set (2 sets)");
/// assert_eq!(breakdown.total.cents(), 4000);
/// assert_eq!(breakdown.estimated_completion_days, 14);
/// ```
pub fn compute_breakdown<C: Catalog + ?Sized>(
    request: &PricingRequest,
    catalog: &C,
    delivery: &[DeliveryMethodConfig],
    settings: &PricingSettings,
    today: NaiveDate,
) -> PricingResult<Breakdown> {
    compute_breakdown_observed(request, catalog, delivery, settings, today, &mut NoopObserver)
}

/// Like [`compute_breakdown`], with a diagnostics hook for dropped
/// selections and delivery fallbacks.
pub fn compute_breakdown_observed<C: Catalog + ?Sized>(
    request: &PricingRequest,
    catalog: &C,
    delivery: &[DeliveryMethodConfig],
    settings: &PricingSettings,
    today: NaiveDate,
    observer: &mut dyn PricingObserver,
) -> PricingResult<Breakdown> {
    validate_settings(settings)?;
    validate_delivery_table(delivery)?;

    let items = build_item_lines(&request.cart, catalog, settings, observer)?;

    let resolved = resolve_delivery(&request.fulfillment, delivery, &settings.default_delivery_method)?;
    let fulfillment = resolved.to_fulfillment();
    if resolved.fell_back {
        observer.delivery_fallback(&request.fulfillment, &fulfillment);
    }
    let estimated_completion_date = completion_date(today, resolved.speed.days)?;

    let has_items = !items.is_empty();
    let mut line_items = items.lines;
    line_items.push(delivery_line(&resolved, has_items));

    let subtotal: Money = line_items.iter().map(|l| l.amount).sum();
    let outcome = apply_discounts(subtotal, request.promo.as_ref(), request.admin_discount, settings);
    let discounts = outcome.discounts();
    let total = outcome.total;
    line_items.extend(outcome.lines);

    debug!(
        items = items.summary.len(),
        subtotal = %subtotal,
        discounts = %discounts,
        total = %total,
        "Computed breakdown"
    );

    Ok(Breakdown {
        line_items,
        subtotal,
        discounts,
        total,
        estimated_completion_days: resolved.speed.days,
        estimated_completion_date,
        summary: items.summary,
        fulfillment,
    })
}

/// [`compute_breakdown`] against the local calendar date, read once.
pub fn compute_breakdown_today<C: Catalog + ?Sized>(
    request: &PricingRequest,
    catalog: &C,
    delivery: &[DeliveryMethodConfig],
    settings: &PricingSettings,
) -> PricingResult<Breakdown> {
    let today = Local::now().date_naive();
    compute_breakdown(request, catalog, delivery, settings, today)
}
