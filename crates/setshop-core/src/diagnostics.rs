//! # Pricing Diagnostics
//!
//! Hook for the things pricing does quietly.
//!
//! A selection whose shape is missing from the catalog is dropped from the
//! breakdown, not reported as an error. That keeps a stale cart renderable,
//! but it can also hide a deleted catalog entry shrinking an existing
//! order's price. Callers that care (telemetry, admin tooling) pass an
//! observer; everyone else gets [`NoopObserver`]. Every event is also
//! logged through `tracing`.

use crate::types::{FulfillmentRequest, ItemSelection, ResolvedFulfillment};

/// Receives notable-but-not-fatal pricing events.
pub trait PricingObserver {
    /// A selection was skipped because its shape did not resolve.
    fn unresolved_shape(&mut self, index: usize, selection: &ItemSelection) {
        let _ = (index, selection);
    }

    /// The requested method or speed was replaced by a default.
    fn delivery_fallback(&mut self, requested: &FulfillmentRequest, resolved: &ResolvedFulfillment) {
        let _ = (requested, resolved);
    }
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PricingObserver for NoopObserver {}

/// Collects events in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingObserver {
    /// `(cart index, shape id)` of every dropped selection.
    pub unresolved_shapes: Vec<(usize, String)>,
    /// `(method id, speed id)` actually used, for every fallback.
    pub delivery_fallbacks: Vec<(String, String)>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when pricing had nothing to report.
    pub fn is_clean(&self) -> bool {
        self.unresolved_shapes.is_empty() && self.delivery_fallbacks.is_empty()
    }
}

impl PricingObserver for RecordingObserver {
    fn unresolved_shape(&mut self, index: usize, selection: &ItemSelection) {
        self.unresolved_shapes.push((index, selection.shape_id.clone()));
    }

    fn delivery_fallback(&mut self, _requested: &FulfillmentRequest, resolved: &ResolvedFulfillment) {
        self.delivery_fallbacks
            .push((resolved.method_id.clone(), resolved.speed_id.clone()));
    }
}
