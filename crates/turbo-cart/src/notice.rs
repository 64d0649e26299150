//! User-facing confirmations for cart operations.
//!
//! The cart itself never renders anything; views turn these into toasts.

use serde::Serialize;

use crate::cart::{AddOutcome, RemoveOutcome, SetQuantityOutcome};
use crate::checkout::PlacedOrder;
use crate::error::CartError;

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A short title/description pair shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartNotice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl CartNotice {
    fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn added(outcome: &AddOutcome) -> Self {
        let description = if outcome.is_new_item {
            "Item has been added to your cart".to_string()
        } else {
            format!("Quantity updated (+{})", outcome.added_quantity)
        };
        Self::new("Added to cart", description)
    }

    pub fn removed(outcome: &RemoveOutcome) -> Self {
        Self::new(
            "Item removed",
            format!("{} has been removed from your cart", outcome.removed_product_name),
        )
    }

    /// Only removals are announced; plain quantity changes are silent.
    pub fn quantity_set(outcome: &SetQuantityOutcome) -> Option<Self> {
        outcome.was_removed.then(|| {
            Self::new(
                "Item removed",
                format!("{} has been removed from your cart", outcome.product_name),
            )
        })
    }

    pub fn cleared() -> Self {
        Self::new("Cart cleared", "All items have been removed from your cart")
    }

    pub fn order_placed(order: &PlacedOrder) -> Self {
        Self::new(
            "Order Placed Successfully!",
            format!(
                "Your order #{} has been placed. You will receive a confirmation email shortly.",
                order.id
            ),
        )
    }

    pub fn failed(error: &CartError) -> Self {
        let title = match error {
            CartError::EmptyCart => "Empty Cart",
            CartError::Checkout(_) => "Order Failed",
            _ => "Error",
        };
        Self {
            title: title.to_string(),
            description: error.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }
}
