//! # Pricing Settings
//!
//! The handful of business constants the engine needs besides the catalog
//! and the delivery table. They are plain data, passed into every call.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  custom_art_setup_fee      added to the unit price of custom sets      │
//! │  default_delivery_method   used when the requested method is unknown   │
//! │  legacy_codes              CODE → basis points of the running subtotal │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_CUSTOM_ART_SETUP_FEE_CENTS, DEFAULT_DELIVERY_METHOD};

/// Business constants for one pricing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    /// One-off setup charge per custom set, folded into its unit price.
    pub custom_art_setup_fee: Money,

    /// Method id used when the requested one is missing or unknown.
    pub default_delivery_method: String,

    /// Legacy promo codes. Keys are matched case-insensitively; values are
    /// basis points (1000 = 10% off).
    pub legacy_codes: BTreeMap<String, u32>,
}

impl PricingSettings {
    /// Looks up a legacy code, ignoring ASCII case and surrounding blanks.
    ///
    /// Returns the canonical code as configured and its rate.
    ///
    /// ```rust
    /// use setshop_core::PricingSettings;
    ///
    /// let settings = PricingSettings::default();
    /// let (code, bps) = settings.legacy_code(" welcome10 ").unwrap();
    /// assert_eq!(code, "WELCOME10");
    /// assert_eq!(bps, 1000);
    /// ```
    pub fn legacy_code(&self, code: &str) -> Option<(&str, u32)> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.legacy_codes
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(code))
            .map(|(known, bps)| (known.as_str(), *bps))
    }
}

/// The legacy codes printed on older flyers.
pub fn default_legacy_codes() -> BTreeMap<String, u32> {
    [("WELCOME10", 1000), ("SETS15", 1500), ("FRIENDS20", 2000)]
        .into_iter()
        .map(|(code, bps)| (code.to_string(), bps))
        .collect()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            custom_art_setup_fee: Money::from_cents(DEFAULT_CUSTOM_ART_SETUP_FEE_CENTS),
            default_delivery_method: DEFAULT_DELIVERY_METHOD.to_string(),
            legacy_codes: default_legacy_codes(),
        }
    }
}
