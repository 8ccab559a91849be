//! End-to-end pricing scenarios, driven through the loose-JSON entry the
//! ordering UI uses.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{json, Value};
use setshop_core::normalize::normalize_request;
use setshop_core::{
    compute_breakdown, Breakdown, CatalogShape, DeliveryMethodConfig, Money, PricingError,
    PricingSettings, ShapeCatalog, SpeedOption,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn catalog() -> ShapeCatalog {
    [
        CatalogShape::new("almond", "Almond", Money::from_cents(2000)),
        CatalogShape::new("coffin", "Coffin", Money::from_cents(2500)),
    ]
    .into_iter()
    .collect()
}

fn speed(label: &str, fee_cents: i64, days: u32) -> SpeedOption {
    SpeedOption {
        label: label.to_string(),
        description: String::new(),
        fee: Money::from_cents(fee_cents),
        days,
        tagline: String::new(),
    }
}

fn delivery() -> Vec<DeliveryMethodConfig> {
    let mut pickup = BTreeMap::new();
    pickup.insert("standard".to_string(), speed("Standard", 0, 14));
    pickup.insert("rush".to_string(), speed("Rush", 1500, 5));

    let mut shipping = BTreeMap::new();
    shipping.insert("standard".to_string(), speed("Standard", 0, 21));
    shipping.insert("priority".to_string(), speed("Priority", 1000, 10));

    vec![
        DeliveryMethodConfig {
            id: "pickup".to_string(),
            label: "Pickup".to_string(),
            description: "Collect from the studio".to_string(),
            base_fee: Money::zero(),
            speed_options: pickup,
            default_speed: "standard".to_string(),
        },
        DeliveryMethodConfig {
            id: "shipping".to_string(),
            label: "Shipping".to_string(),
            description: "Tracked post".to_string(),
            base_fee: Money::from_cents(600),
            speed_options: shipping,
            default_speed: "standard".to_string(),
        },
    ]
}

fn price(request: Value) -> Breakdown {
    let request = normalize_request(&request);
    compute_breakdown(&request, &catalog(), &delivery(), &PricingSettings::default(), today()).unwrap()
}

fn almond_pair(extra: Value) -> Value {
    let mut request = json!({
        "cart": [{ "shapeId": "almond", "quantity": 2, "description": "" }],
        "fulfillment": { "method": "pickup", "speed": "standard" }
    });
    if let (Some(base), Some(extra)) = (request.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    request
}

#[test]
fn test_almond_pickup_scenario() {
    let breakdown = price(almond_pair(json!({})));

    assert_eq!(breakdown.line_items.len(), 2);
    assert_eq!(breakdown.line_items[0].label, "Almond Set (2 sets)");
    assert_eq!(breakdown.line_items[0].amount, Money::from_cents(4000));
    assert_eq!(breakdown.line_items[1].id, "delivery");
    assert_eq!(breakdown.line_items[1].amount, Money::zero());
    assert_eq!(breakdown.subtotal, Money::from_cents(4000));
    assert_eq!(breakdown.total, Money::from_cents(4000));
    assert_eq!(breakdown.estimated_completion_days, 14);
    assert_eq!(
        breakdown.estimated_completion_date,
        NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
    );
    assert!(breakdown.is_consistent());
}

#[test]
fn test_admin_discount_exceeding_subtotal() {
    let breakdown = price(almond_pair(json!({ "adminDiscount": 100 })));

    let admin = breakdown.line("admin_discount").unwrap();
    assert_eq!(admin.amount, Money::from_cents(-4000));
    assert_eq!(breakdown.total, Money::zero());
    assert_eq!(breakdown.discounts, Money::from_cents(4000));
    assert!(breakdown.is_consistent());
}

#[test]
fn test_quantity_coercion_variants() {
    for quantity in [json!(0), json!(-3), json!("abc")] {
        let breakdown = price(json!({
            "cart": [{ "shapeId": "almond", "quantity": quantity }],
            "fulfillment": { "method": "pickup" }
        }));
        assert_eq!(breakdown.summary[0].quantity, 1);
        assert_eq!(breakdown.line_items[0].label, "Almond Set (1 set)");
        assert_eq!(breakdown.total, Money::from_cents(2000));
    }
}

#[test]
fn test_unknown_shape_is_absent() {
    let breakdown = price(json!({
        "cart": [
            { "shapeId": "stiletto", "quantity": 4 },
            { "shapeId": "coffin" }
        ],
        "fulfillment": { "method": "pickup", "speed": "standard" }
    }));

    assert_eq!(breakdown.summary.len(), 1);
    assert_eq!(breakdown.summary[0].shape_id, "coffin");
    assert!(breakdown.line("set_0").is_none());
    assert_eq!(breakdown.line("set_1").map(|l| l.amount), Some(Money::from_cents(2500)));
}

#[test]
fn test_empty_cart_still_estimates_delivery() {
    let breakdown = price(json!({
        "cart": [],
        "fulfillment": { "method": "shipping", "speed": "priority" }
    }));

    assert_eq!(breakdown.line_items.len(), 1);
    assert_eq!(breakdown.line_items[0].id, "delivery");
    assert_eq!(breakdown.line_items[0].amount, Money::zero());
    assert_eq!(breakdown.subtotal, Money::zero());
    assert_eq!(breakdown.total, Money::zero());
    assert_eq!(breakdown.discounts, Money::zero());
    assert_eq!(breakdown.estimated_completion_days, 10);
    assert_eq!(
        breakdown.estimated_completion_date,
        NaiveDate::from_ymd_opt(2026, 10, 28).unwrap()
    );
}

#[test]
fn test_custom_art_surcharge_difference() {
    let plain = price(json!({ "cart": [{ "shapeId": "coffin" }] }));
    let custom = price(json!({ "cart": [{ "shapeId": "coffin", "description": "chrome tips" }] }));

    let fee = PricingSettings::default().custom_art_setup_fee;
    assert_eq!(custom.summary[0].unit_price - plain.summary[0].unit_price, fee);
    assert!(custom.summary[0].requires_custom_art);
    assert!(!plain.summary[0].requires_custom_art);
}

#[test]
fn test_shipping_fee_is_charged_once() {
    let breakdown = price(json!({
        "cart": [{ "shapeId": "almond" }],
        "fulfillment": { "method": "shipping", "speed": "priority" }
    }));

    let delivery_lines: Vec<_> = breakdown
        .line_items
        .iter()
        .filter(|l| l.id == "delivery")
        .collect();
    assert_eq!(delivery_lines.len(), 1);
    assert_eq!(delivery_lines[0].amount, Money::from_cents(1600));
    assert_eq!(delivery_lines[0].label, "Shipping - Priority");
    assert_eq!(breakdown.fulfillment.fee, Money::from_cents(1600));
}

#[test]
fn test_legacy_code_and_admin_in_fixed_order() {
    let breakdown = price(almond_pair(json!({ "promo": "Welcome10", "adminDiscount": 10 })));

    let ids: Vec<&str> = breakdown.line_items.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["set_0", "delivery", "promo", "admin_discount"]);
    assert_eq!(breakdown.line("promo").map(|l| l.amount), Some(Money::from_cents(-400)));
    assert_eq!(breakdown.total, Money::from_cents(2600));
}

#[test]
fn test_invalid_promo_object_contributes_nothing() {
    let breakdown = price(almond_pair(json!({ "promo": { "valid": false, "discount": 20 } })));
    assert!(breakdown.line("promo").is_none());
    assert_eq!(breakdown.total, Money::from_cents(4000));
}

#[test]
fn test_unknown_method_falls_back_to_pickup() {
    let breakdown = price(json!({
        "cart": [{ "shapeId": "almond" }],
        "fulfillment": { "method": "teleport", "speed": "rush" }
    }));

    assert_eq!(breakdown.fulfillment.method_id, "pickup");
    assert_eq!(breakdown.fulfillment.speed_id, "rush");
    assert_eq!(breakdown.estimated_completion_days, 5);
}

#[test]
fn test_missing_delivery_config_is_fatal() {
    let request = normalize_request(&almond_pair(json!({})));
    let err = compute_breakdown(&request, &catalog(), &[], &PricingSettings::default(), today()).unwrap_err();
    assert!(matches!(err, PricingError::EmptyDeliveryConfig));
}

#[test]
fn test_breakdown_json_shape() {
    let breakdown = price(almond_pair(json!({})));
    let json = serde_json::to_value(&breakdown).unwrap();

    assert_eq!(json["subtotal"], 4000);
    assert_eq!(json["estimatedCompletionDays"], 14);
    assert_eq!(json["estimatedCompletionDate"], "2026-11-01");
    assert_eq!(json["lineItems"][0]["id"], "set_0");
    assert_eq!(json["summary"][0]["requiresCustomArt"], false);
}
