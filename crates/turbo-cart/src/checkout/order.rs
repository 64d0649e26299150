//! Order payloads built from the cart.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cart::{total_price, CartLine};
use crate::checkout::ShippingAddress;
use crate::error::CartError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;

/// Order status at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
}

/// One ordered product, priced at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraftItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub price_at_time: Money,
}

/// The opaque payload submitted to the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    pub items: Vec<OrderDraftItem>,
    pub subtotal: Money,
    pub tax: Money,
    /// Subtotal plus tax.
    pub total_amount: Money,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
}

impl OrderDraft {
    /// Build an order from cart lines.
    ///
    /// Returns an error if:
    /// - The cart has no lines
    /// - A required shipping field is blank
    pub fn from_lines(
        lines: &[CartLine],
        tax_rate: f64,
        shipping_address: ShippingAddress,
    ) -> Result<Self, CartError> {
        if lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let missing = shipping_address.missing_fields();
        if !missing.is_empty() {
            return Err(CartError::InvalidArgument(format!(
                "Shipping address is missing: {}",
                missing.join(", ")
            )));
        }

        let items = lines
            .iter()
            .map(|line| OrderDraftItem {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price_at_time: line.product.price,
            })
            .collect();

        let subtotal = total_price(lines);
        let tax = subtotal.multiply_decimal(tax_rate);
        let total_amount = subtotal.saturating_add(&tax);

        Ok(Self {
            items,
            subtotal,
            tax,
            total_amount,
            status: OrderStatus::Pending,
            shipping_address,
        })
    }
}

/// Acknowledgement from the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    pub id: OrderId,
}

/// The external order-placement service.
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// Persist an order, returning its id.
    async fn place_order(&self, draft: &OrderDraft) -> anyhow::Result<PlacedOrder>;
}
