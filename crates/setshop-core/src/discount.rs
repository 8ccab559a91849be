//! # Discount Application
//!
//! Applies the promo and the operator discount to the running subtotal.
//!
//! ## Stage Order (not commutative)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  running = Σ item lines + delivery line                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PROMO STAGE                                                            │
//! │  ├── Validated { discount }  → min(discount, running)                   │
//! │  ├── LegacyCode  (in table)  → running × bps, half-up, then clamp       │
//! │  └── unknown code / none     → nothing appended                         │
//! │       │  running -= applied                                             │
//! │       ▼                                                                 │
//! │  ADMIN STAGE (always second, on the post-promo running value)          │
//! │  └── min(admin, running)     → "admin_discount" line if > 0             │
//! │       │  running -= applied                                             │
//! │       ▼                                                                 │
//! │  total = running   (never below zero: clamp happens before append)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A percentage code applied after a flat operator discount would yield a
//! different total, which is why the order is fixed here and not left to
//! the caller.

use tracing::debug;

use crate::money::Money;
use crate::settings::PricingSettings;
use crate::types::{LineItem, PromoInput};

/// The discount lines and the running value they leave behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountOutcome {
    /// Zero, one or two lines: `promo` then `admin_discount`.
    pub lines: Vec<LineItem>,
    /// Subtotal after every discount. Never negative.
    pub total: Money,
}

impl DiscountOutcome {
    /// Sum of the applied discount magnitudes.
    pub fn discounts(&self) -> Money {
        self.lines.iter().map(|l| l.amount.abs()).sum()
    }
}

/// Formats basis points as a percentage: 1000 → "10", 1250 → "12.5".
fn percent_label(bps: u32) -> String {
    let whole = bps / 100;
    let fraction = bps % 100;
    if fraction == 0 {
        whole.to_string()
    } else if fraction % 10 == 0 {
        format!("{}.{}", whole, fraction / 10)
    } else {
        format!("{}.{:02}", whole, fraction)
    }
}

/// Runs the promo stage against `running`.
///
/// Returns the `promo` line, or `None` when the promo contributes nothing
/// (no promo, unknown legacy code, or a zero amount after clamping).
pub fn apply_promo(running: Money, promo: Option<&PromoInput>, settings: &PricingSettings) -> Option<LineItem> {
    let (requested, label) = match promo? {
        PromoInput::Validated {
            discount,
            description,
            code,
        } => {
            let label = match (description, code) {
                (Some(description), _) => description.clone(),
                (None, Some(code)) => format!("Promo code {}", code),
                (None, None) => "Promo discount".to_string(),
            };
            (*discount, label)
        }
        PromoInput::LegacyCode { code } => {
            let Some((canonical, bps)) = settings.legacy_code(code) else {
                debug!(code = %code, "Legacy promo code not recognized");
                return None;
            };
            let amount = running.non_negative().percentage(bps);
            (
                amount,
                format!("Promo code {} ({}% off)", canonical, percent_label(bps)),
            )
        }
    };

    let applied = requested.clamp_to(running);
    if !applied.is_positive() {
        return None;
    }

    debug!(requested = %requested, applied = %applied, "Applied promo");
    Some(LineItem::new(LineItem::PROMO_ID, label, -applied))
}

/// Runs the admin stage against `running`.
pub fn apply_admin_discount(running: Money, admin_discount: Money) -> Option<LineItem> {
    let applied = admin_discount.clamp_to(running);
    if !applied.is_positive() {
        return None;
    }

    debug!(requested = %admin_discount, applied = %applied, "Applied admin discount");
    Some(LineItem::new(
        LineItem::ADMIN_DISCOUNT_ID,
        "Admin discount",
        -applied,
    ))
}

/// Applies promo then admin discount to `subtotal`.
///
/// ```rust
/// use setshop_core::discount::apply_discounts;
/// use setshop_core::{Money, PricingSettings, PromoInput};
///
/// let outcome = apply_discounts(
///     Money::from_cents(4000),
///     Some(&PromoInput::legacy("welcome10")),
///     Money::from_cents(10_000),
///     &PricingSettings::default(),
/// );
///
/// // 10% promo takes $4.00, admin discount takes the remaining $36.00
/// assert_eq!(outcome.lines[0].amount.cents(), -400);
/// assert_eq!(outcome.lines[1].amount.cents(), -3600);
/// assert!(outcome.total.is_zero());
/// ```
pub fn apply_discounts(
    subtotal: Money,
    promo: Option<&PromoInput>,
    admin_discount: Money,
    settings: &PricingSettings,
) -> DiscountOutcome {
    let mut running = subtotal.non_negative();
    let mut lines = Vec::with_capacity(2);

    if let Some(line) = apply_promo(running, promo, settings) {
        running += line.amount;
        lines.push(line);
    }

    if let Some(line) = apply_admin_discount(running, admin_discount) {
        running += line.amount;
        lines.push(line);
    }

    DiscountOutcome {
        lines,
        total: running,
    }
}
