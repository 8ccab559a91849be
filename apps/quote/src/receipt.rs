//! Plain-text receipt rendering.
//!
//! ```text
//! Almond Set (2 sets)                   $40.00
//! Pickup - Standard                      $0.00
//! Promo code WELCOME10 (10% off)        -$4.00
//! --------------------------------------------
//! Subtotal                              $40.00
//! Discounts                             -$4.00
//! Total                                 $36.00
//!
//! Ready in 14 days (2026-11-01)
//! ```

use std::fmt::Write;

use setshop_core::{Breakdown, Money, RecordingObserver};

const LABEL_WIDTH: usize = 32;
const AMOUNT_WIDTH: usize = 12;

fn row(out: &mut String, label: &str, amount: Money, symbol: &str) {
    let _ = writeln!(
        out,
        "{:<label$}{:>amount$}",
        label,
        amount.format_currency(symbol),
        label = LABEL_WIDTH,
        amount = AMOUNT_WIDTH,
    );
}

/// Renders a breakdown as a fixed-width receipt.
///
/// Dropped selections and delivery fallbacks recorded by `observer` are
/// listed under the total so an operator can see why a line is missing.
pub fn render(breakdown: &Breakdown, symbol: &str, observer: &RecordingObserver) -> String {
    let mut out = String::new();
    let rule = "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH);

    for line in &breakdown.line_items {
        row(&mut out, &line.label, line.amount, symbol);
    }
    let _ = writeln!(out, "{}", rule);
    row(&mut out, "Subtotal", breakdown.subtotal, symbol);
    if !breakdown.discounts.is_zero() {
        row(&mut out, "Discounts", -breakdown.discounts, symbol);
    }
    row(&mut out, "Total", breakdown.total, symbol);

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Ready in {} days ({})",
        breakdown.estimated_completion_days, breakdown.estimated_completion_date
    );

    if !observer.is_clean() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes:");
        for (index, shape_id) in &observer.unresolved_shapes {
            let _ = writeln!(out, "  Skipped item {}: unknown shape '{}'", index + 1, shape_id);
        }
        for (method, speed) in &observer.delivery_fallbacks {
            let _ = writeln!(out, "  Delivery defaulted to {} / {}", method, speed);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use setshop_core::{LineItem, ResolvedFulfillment};

    use super::*;

    fn breakdown() -> Breakdown {
        Breakdown {
            line_items: vec![
                LineItem::new("set_0", "Almond Set (2 sets)", Money::from_cents(4000)),
                LineItem::new("delivery", "Pickup - Standard", Money::zero()),
                LineItem::new("promo", "Promo code WELCOME10 (10% off)", Money::from_cents(-400)),
            ],
            subtotal: Money::from_cents(4000),
            discounts: Money::from_cents(400),
            total: Money::from_cents(3600),
            estimated_completion_days: 14,
            estimated_completion_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            summary: Vec::new(),
            fulfillment: ResolvedFulfillment {
                method_id: "pickup".to_string(),
                method_label: "Pickup".to_string(),
                speed_id: "standard".to_string(),
                speed_label: "Standard".to_string(),
                fee: Money::zero(),
                days: 14,
            },
        }
    }

    #[test]
    fn test_render_lines_and_totals() {
        let text = render(&breakdown(), "$", &RecordingObserver::new());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Almond Set (2 sets)"));
        assert!(lines[0].ends_with("$40.00"));
        assert!(lines[2].ends_with("-$4.00"));
        assert!(lines[3].chars().all(|c| c == '-'));
        assert!(lines[5].starts_with("Discounts") && lines[5].ends_with("-$4.00"));
        assert!(lines[6].starts_with("Total") && lines[6].ends_with("$36.00"));
        assert!(text.contains("Ready in 14 days (2026-11-01)"));
        assert!(!text.contains("Skipped"));
        assert!(!text.contains("Notes:"));
        assert!(text.ends_with("(2026-11-01)\n"));
    }

    #[test]
    fn test_render_notes_and_symbol() {
        let mut observer = RecordingObserver::new();
        observer.unresolved_shapes.push((1, "ghost".to_string()));

        let text = render(&breakdown(), "€", &observer);
        assert!(text.contains("€36.00"));
        assert!(text.contains("Notes:\n  Skipped item 2: unknown shape 'ghost'"));
    }

    #[test]
    fn test_render_fallback_note() {
        let mut observer = RecordingObserver::new();
        observer
            .delivery_fallbacks
            .push(("pickup".to_string(), "standard".to_string()));

        let text = render(&breakdown(), "$", &observer);
        assert!(text.contains("Notes:\n  Delivery defaulted to pickup / standard"));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn test_zero_discounts_row_omitted() {
        let mut b = breakdown();
        b.line_items.pop();
        b.discounts = Money::zero();
        b.total = b.subtotal;

        let text = render(&b, "$", &RecordingObserver::new());
        assert!(!text.contains("Discounts"));
    }
}
