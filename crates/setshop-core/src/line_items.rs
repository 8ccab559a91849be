//! # Item Lines
//!
//! One priced line (and one summary row) per selection whose shape exists.
//!
//! ## Pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selection: almond ×2, description "gold chrome"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.shape("almond") ──► None? ──► skip (observer + warn!)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_catalog_shape ──► negative price? ──► PricingError            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  requires_custom_art = art uploaded OR description present  → true     │
//! │  unit_price = base 20.00 + setup fee 10.00                  → 30.00     │
//! │  line       = 30.00 × 2                                     → 60.00     │
//! │  label      = "Almond Set (2 sets)"                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;

use crate::catalog::Catalog;
use crate::diagnostics::PricingObserver;
use crate::error::PricingResult;
use crate::money::Money;
use crate::settings::PricingSettings;
use crate::types::{CatalogShape, ItemSelection, ItemSummary, LineItem};
use crate::validation::validate_catalog_shape;

/// Item lines and their summary rows, in cart order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLines {
    pub lines: Vec<LineItem>,
    pub summary: Vec<ItemSummary>,
}

impl ItemLines {
    /// Sum of the item lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The name a set is shown under: the customer's label, or "<Shape> Set".
pub fn display_name(selection: &ItemSelection, shape: &CatalogShape) -> String {
    match selection.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{} Set", shape.name),
    }
}

/// "Almond Set (1 set)" / "Almond Set (3 sets)".
///
/// ```rust
/// use setshop_core::line_items::set_label;
///
/// assert_eq!(set_label("Almond Set", 1), "Almond Set (1 set)");
/// assert_eq!(set_label("Almond Set", 2), "Almond Set (2 sets)");
/// ```
pub fn set_label(display_name: &str, quantity: u32) -> String {
    let unit = if quantity == 1 { "set" } else { "sets" };
    format!("{} ({} {})", display_name, quantity, unit)
}

/// Unit price of a selection given its shape.
pub fn unit_price(selection: &ItemSelection, shape: &CatalogShape, settings: &PricingSettings) -> Money {
    if selection.requires_custom_art() {
        shape.base_price + settings.custom_art_setup_fee
    } else {
        shape.base_price
    }
}

/// Prices every selection that resolves in the catalog.
///
/// Line ids use the selection's position in `cart`, so dropping an
/// unresolved selection does not renumber the ones after it.
///
/// ## Errors
/// A resolved shape with a blank id or name, or a negative base price, is a
/// catalog fault and fails the whole call.
pub fn build_item_lines<C: Catalog + ?Sized>(
    cart: &[ItemSelection],
    catalog: &C,
    settings: &PricingSettings,
    observer: &mut dyn PricingObserver,
) -> PricingResult<ItemLines> {
    let mut out = ItemLines::default();

    for (index, selection) in cart.iter().enumerate() {
        let Some(shape) = catalog.shape(&selection.shape_id) else {
            warn!(
                index,
                shape_id = %selection.shape_id,
                selection_id = ?selection.id,
                "Shape not in catalog, selection left out of pricing"
            );
            observer.unresolved_shape(index, selection);
            continue;
        };
        validate_catalog_shape(shape)?;

        let quantity = selection.quantity.max(1);
        let requires_custom_art = selection.requires_custom_art();
        let unit_price = unit_price(selection, shape, settings);
        let line_subtotal = unit_price.multiply_quantity(quantity);
        let name = display_name(selection, shape);
        let line_id = LineItem::set_id(index);

        out.lines.push(LineItem::new(
            line_id.clone(),
            set_label(&name, quantity),
            line_subtotal,
        ));
        out.summary.push(ItemSummary {
            line_id,
            selection_id: selection.id.clone(),
            shape_id: shape.id.clone(),
            shape_name: shape.name.clone(),
            display_name: name,
            quantity,
            unit_price,
            line_subtotal,
            requires_custom_art,
            custom_art_count: u32::try_from(selection.custom_art_assets.len()).unwrap_or(u32::MAX),
            description: selection.description.clone(),
            notes: selection.notes.clone(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeCatalog;
    use crate::diagnostics::{NoopObserver, RecordingObserver};
    use crate::error::{PricingError, ValidationError};

    fn catalog() -> ShapeCatalog {
        [
            CatalogShape::new("almond", "Almond", Money::from_cents(2000)),
            CatalogShape::new("square", "Square", Money::from_cents(1800)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_plain_selection() {
        let cart = vec![ItemSelection::new("almond").with_quantity(2)];
        let lines = build_item_lines(&cart, &catalog(), &PricingSettings::default(), &mut NoopObserver).unwrap();

        assert_eq!(lines.lines.len(), 1);
        assert_eq!(lines.lines[0].id, "set_0");
        assert_eq!(lines.lines[0].label, "Almond Set (2 sets)");
        assert_eq!(lines.lines[0].amount.cents(), 4000);
        assert!(!lines.summary[0].requires_custom_art);
        assert_eq!(lines.summary[0].unit_price.cents(), 2000);
    }

    #[test]
    fn test_custom_name_and_surcharge() {
        let cart = vec![ItemSelection::new("square")
            .with_name("Wedding")
            .with_description("pearls on ring fingers")];
        let settings = PricingSettings::default();
        let lines = build_item_lines(&cart, &catalog(), &settings, &mut NoopObserver).unwrap();

        assert_eq!(lines.lines[0].label, "Wedding (1 set)");
        assert_eq!(
            lines.summary[0].unit_price,
            Money::from_cents(1800) + settings.custom_art_setup_fee
        );
        assert!(lines.summary[0].requires_custom_art);
    }

    #[test]
    fn test_unknown_shape_skipped_but_indices_kept() {
        let cart = vec![
            ItemSelection::new("stiletto"),
            ItemSelection::new("almond"),
        ];
        let mut observer = RecordingObserver::new();
        let lines = build_item_lines(&cart, &catalog(), &PricingSettings::default(), &mut observer).unwrap();

        assert_eq!(lines.lines.len(), 1);
        assert_eq!(lines.lines[0].id, "set_1");
        assert_eq!(lines.summary.len(), 1);
        assert_eq!(observer.unresolved_shapes, vec![(0, "stiletto".to_string())]);
    }

    #[test]
    fn test_subtotal() {
        let cart = vec![
            ItemSelection::new("almond"),
            ItemSelection::new("square").with_quantity(3),
        ];
        let lines = build_item_lines(&cart, &catalog(), &PricingSettings::default(), &mut NoopObserver).unwrap();
        assert_eq!(lines.subtotal().cents(), 2000 + 5400);
    }

    #[test]
    fn test_negative_catalog_price_fails() {
        let catalog: ShapeCatalog = [CatalogShape::new("almond", "Almond", Money::from_cents(-500))]
            .into_iter()
            .collect();
        let cart = vec![ItemSelection::new("almond")];

        let err = build_item_lines(&cart, &catalog, &PricingSettings::default(), &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "base_price"
        ));
    }

    #[test]
    fn test_bad_shape_not_in_cart_is_ignored() {
        let catalog: ShapeCatalog = [
            CatalogShape::new("almond", "Almond", Money::from_cents(2000)),
            CatalogShape::new("broken", "Broken", Money::from_cents(-1)),
        ]
        .into_iter()
        .collect();
        let cart = vec![ItemSelection::new("almond")];

        let lines = build_item_lines(&cart, &catalog, &PricingSettings::default(), &mut NoopObserver).unwrap();
        assert_eq!(lines.subtotal().cents(), 2000);
    }
}
