//! # Delivery Resolution
//!
//! Picks the delivery method and speed tier to charge, and derives the
//! completion estimate from it.
//!
//! ## Fallback Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  requested method ──found──► method                                    │
//! │        │ missing/unknown                                                │
//! │        ▼                                                                │
//! │  settings.default_delivery_method ──found──► method                    │
//! │        │ not in table                                                   │
//! │        ▼                                                                │
//! │  first method in the table                                              │
//! │                                                                         │
//! │  requested speed ──found in method──► speed                            │
//! │        │ missing/unknown                                                │
//! │        ▼                                                                │
//! │  method.default_speed (must resolve, else PricingError)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fee Model
//! Exactly one fulfillment charge per order: the method's base fee and the
//! speed tier's fee are two non-overlapping parts of the same `delivery`
//! line, never two lines.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::{DeliveryMethodConfig, FulfillmentRequest, LineItem, ResolvedFulfillment, SpeedOption};

/// A method and speed borrowed out of the delivery table.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDelivery<'a> {
    pub method: &'a DeliveryMethodConfig,
    pub speed_id: &'a str,
    pub speed: &'a SpeedOption,
    /// A requested method or speed was present but unknown.
    pub fell_back: bool,
}

impl ResolvedDelivery<'_> {
    /// Base fee plus speed fee.
    pub fn fee(&self) -> Money {
        self.method.base_fee + self.speed.fee
    }

    /// "Local Delivery - Rush".
    pub fn label(&self) -> String {
        format!("{} - {}", self.method.label, self.speed.label)
    }

    /// Owned summary for the breakdown.
    pub fn to_fulfillment(&self) -> ResolvedFulfillment {
        ResolvedFulfillment {
            method_id: self.method.id.clone(),
            method_label: self.method.label.clone(),
            speed_id: self.speed_id.to_string(),
            speed_label: self.speed.label.clone(),
            fee: self.fee(),
            days: self.speed.days,
        }
    }
}

/// Resolves the requested method and speed against the table.
///
/// ## Errors
/// - [`PricingError::EmptyDeliveryConfig`] when `methods` is empty
/// - [`PricingError::InvalidDeliveryMethod`] when the chosen method's
///   default speed does not resolve
pub fn resolve_delivery<'a>(
    request: &FulfillmentRequest,
    methods: &'a [DeliveryMethodConfig],
    default_method: &str,
) -> PricingResult<ResolvedDelivery<'a>> {
    let find = |id: &str| methods.iter().find(|m| m.id == id);

    let requested_method = request.method.as_deref().and_then(find);
    let method = requested_method
        .or_else(|| find(default_method))
        .or_else(|| methods.first())
        .ok_or(PricingError::EmptyDeliveryConfig)?;
    let method_fell_back = request.method.is_some() && requested_method.is_none();

    let requested_speed = request
        .speed
        .as_deref()
        .and_then(|id| method.speed_options.get_key_value(id));
    let (speed_id, speed) = match requested_speed {
        Some(found) => found,
        None => method
            .speed_options
            .get_key_value(method.default_speed.as_str())
            .ok_or_else(|| PricingError::InvalidDeliveryMethod {
                method: method.id.clone(),
                reason: format!("default speed '{}' is not configured", method.default_speed),
            })?,
    };
    let speed_fell_back = request.speed.is_some() && requested_speed.is_none();

    debug!(
        method = %method.id,
        speed = %speed_id,
        fee = %(method.base_fee + speed.fee),
        "Resolved delivery"
    );

    Ok(ResolvedDelivery {
        method,
        speed_id: speed_id.as_str(),
        speed,
        fell_back: method_fell_back || speed_fell_back,
    })
}

/// The single `delivery` line. The fee is waived when nothing is priced.
pub fn delivery_line(resolved: &ResolvedDelivery<'_>, has_items: bool) -> LineItem {
    let amount = if has_items { resolved.fee() } else { Money::zero() };
    LineItem::new(LineItem::DELIVERY_ID, resolved.label(), amount)
}

/// `today + days`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use setshop_core::delivery::completion_date;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// assert_eq!(
///     completion_date(today, 14).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
/// );
/// ```
pub fn completion_date(today: NaiveDate, days: u32) -> PricingResult<NaiveDate> {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| PricingError::CompletionDateOutOfRange {
            from: today.to_string(),
            days,
        })
}
