//! # Shape Catalog
//!
//! The engine's read-only view of the product catalog.
//!
//! The catalog itself is owned by an external collaborator (the back
//! office edits it, `setshop-config` loads it). Pricing only ever asks one
//! question: "what is shape X, and what does it cost?"

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::CatalogShape;

/// Synchronous shape lookup.
///
/// Implementations must return `None` for unknown ids rather than
/// panicking; unknown shapes are dropped from pricing, not reported as
/// errors.
pub trait Catalog {
    fn shape(&self, shape_id: &str) -> Option<&CatalogShape>;
}

impl Catalog for HashMap<String, CatalogShape> {
    fn shape(&self, shape_id: &str) -> Option<&CatalogShape> {
        self.get(shape_id)
    }
}

impl Catalog for BTreeMap<String, CatalogShape> {
    fn shape(&self, shape_id: &str) -> Option<&CatalogShape> {
        self.get(shape_id)
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn shape(&self, shape_id: &str) -> Option<&CatalogShape> {
        (**self).shape(shape_id)
    }
}

/// An in-memory catalog keyed by shape id.
///
/// Ordered, so listing it (receipts, config dumps) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeCatalog {
    shapes: BTreeMap<String, CatalogShape>,
}

impl ShapeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a shape. Returns the previous entry, if any.
    pub fn insert(&mut self, shape: CatalogShape) -> Option<CatalogShape> {
        self.shapes.insert(shape.id.clone(), shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogShape> {
        self.shapes.values()
    }
}

impl Catalog for ShapeCatalog {
    fn shape(&self, shape_id: &str) -> Option<&CatalogShape> {
        self.shapes.get(shape_id)
    }
}

impl FromIterator<CatalogShape> for ShapeCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogShape>>(iter: I) -> Self {
        let mut catalog = ShapeCatalog::new();
        for shape in iter {
            catalog.insert(shape);
        }
        catalog
    }
}
