//! Cart entries and their projected cart lines.

use crate::ids::{CartLineId, ProductId};
use crate::product::ProductSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authoritative record of one product's quantity in the session cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Product identifier, unique within the cart.
    pub product_id: ProductId,
    /// Always at least 1; entries reaching 0 are deleted.
    pub quantity: i64,
    /// Set when the entry is created and never changed afterwards.
    pub added_at: DateTime<Utc>,
    /// Product data captured at add time.
    pub product: ProductSnapshot,
}

impl CartEntry {
    /// Create an entry for a product added now.
    pub fn new(product: ProductSnapshot, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity,
            added_at: Utc::now(),
            product,
        }
    }

    /// Check whether this entry is addressed by `product_id`, either by its
    /// key or by the id embedded in its product snapshot.
    pub fn matches(&self, product_id: &ProductId) -> bool {
        self.product_id.as_str() == product_id.as_str()
            || self.product.id.as_str() == product_id.as_str()
    }

    /// Rebuild an entry from its mirror line.
    pub fn from_line(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            added_at: line.created_at,
            product: line.product.clone(),
        }
    }
}

/// Externally shaped mirror of a cart entry, as consumed by views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Synthetic id, `"memory_" + product_id`.
    pub id: CartLineId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub product: ProductSnapshot,
}

impl From<&CartEntry> for CartLine {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: CartLineId::for_product(&entry.product_id),
            product_id: entry.product_id.clone(),
            quantity: entry.quantity,
            created_at: entry.added_at,
            product: entry.product.clone(),
        }
    }
}

/// Project the authoritative entries into cart lines, preserving order.
pub fn project(entries: &[CartEntry]) -> Vec<CartLine> {
    entries.iter().map(CartLine::from).collect()
}

/// Inverse of [`project`]. Lines without a positive quantity are dropped.
pub fn unproject(lines: &[CartLine]) -> Vec<CartEntry> {
    lines
        .iter()
        .filter(|line| line.quantity > 0)
        .map(CartEntry::from_line)
        .collect()
}
