//! Product snapshots carried inside the cart.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A denormalized copy of a catalog product, captured when it is added to
/// the cart and never re-fetched afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Catalog product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: Money,
    /// Price before markdown, if the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Top-level category.
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Bullet-point feature list.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form specification table.
    #[serde(default)]
    pub specifications: serde_json::Map<String, serde_json::Value>,
    /// Whether the product could be bought at snapshot time.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl ProductSnapshot {
    /// Create a snapshot with the fields the cart needs; the rest are empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image: String::new(),
            category: String::new(),
            subcategory: None,
            brand: None,
            description: String::new(),
            features: Vec::new(),
            tags: Vec::new(),
            specifications: serde_json::Map::new(),
            in_stock: true,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the pre-markdown price.
    pub fn with_original_price(mut self, price: Money) -> Self {
        self.original_price = Some(price);
        self
    }
}
