//! Pure cart mutations.
//!
//! Each function takes the current entries and returns the next entry list
//! together with an outcome. Nothing here touches the cache; a failed
//! mutation therefore leaves nothing to undo.

use crate::cart::entry::CartEntry;
use crate::checkout::OrderDraftItem;
use crate::error::CartError;
use crate::ids::{CartLineId, ProductId};
use crate::product::ProductSnapshot;
use serde::Serialize;

/// Result of adding a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    /// True when the product was not in the cart before.
    pub is_new_item: bool,
    /// Quantity added by this call.
    pub added_quantity: i64,
}

/// Result of removing a cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveOutcome {
    pub removed_item: CartEntry,
    pub removed_product_name: String,
}

/// Result of setting a line's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityOutcome {
    pub previous_quantity: i64,
    pub new_quantity: i64,
    /// True when a quantity of 0 deleted the line.
    pub was_removed: bool,
    pub product_name: String,
}

/// Check the arguments of an add.
pub fn validate_add(product: &ProductSnapshot, quantity: i64) -> Result<(), CartError> {
    if product.id.is_empty() {
        return Err(CartError::InvalidArgument(
            "Product is required and must have an id".to_string(),
        ));
    }
    if quantity <= 0 {
        return Err(CartError::InvalidArgument(format!(
            "Quantity must be greater than 0 (got {quantity})"
        )));
    }
    Ok(())
}

/// Check the quantity of a set-quantity.
pub fn validate_set_quantity(quantity: i64) -> Result<(), CartError> {
    if quantity < 0 {
        return Err(CartError::InvalidArgument(format!(
            "Quantity cannot be negative (got {quantity})"
        )));
    }
    Ok(())
}

/// Find the entry a product id refers to: by entry key first, then by the id
/// embedded in the product snapshot.
pub fn locate(entries: &[CartEntry], product_id: &ProductId) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.product_id.as_str() == product_id.as_str())
        .or_else(|| entries.iter().position(|e| e.matches(product_id)))
}

/// Add `quantity` of `product`, accumulating onto an existing entry.
pub fn add(
    entries: &[CartEntry],
    product: &ProductSnapshot,
    quantity: i64,
) -> Result<(Vec<CartEntry>, AddOutcome), CartError> {
    validate_add(product, quantity)?;

    let mut next = entries.to_vec();
    let is_new_item = match next.iter_mut().find(|e| e.product_id == product.id) {
        Some(existing) => {
            existing.quantity = existing.quantity.checked_add(quantity).ok_or_else(|| {
                CartError::InvalidArgument(format!(
                    "Quantity for {} would overflow",
                    product.id
                ))
            })?;
            false
        }
        None => {
            next.push(CartEntry::new(product.clone(), quantity));
            true
        }
    };

    Ok((
        next,
        AddOutcome {
            is_new_item,
            added_quantity: quantity,
        },
    ))
}

/// Remove the line `id` refers to.
pub fn remove(
    entries: &[CartEntry],
    id: &CartLineId,
) -> Result<(Vec<CartEntry>, RemoveOutcome), CartError> {
    let index = locate(entries, id.product_id())
        .ok_or_else(|| CartError::ItemNotFound(id.product_id().to_string()))?;

    let mut next = entries.to_vec();
    let removed_item = next.remove(index);
    let removed_product_name = removed_item.product.name.clone();
    Ok((
        next,
        RemoveOutcome {
            removed_item,
            removed_product_name,
        },
    ))
}

/// Set the absolute quantity of the line `id` refers to; 0 deletes it.
pub fn set_quantity(
    entries: &[CartEntry],
    id: &CartLineId,
    quantity: i64,
) -> Result<(Vec<CartEntry>, SetQuantityOutcome), CartError> {
    validate_set_quantity(quantity)?;

    let index = locate(entries, id.product_id())
        .ok_or_else(|| CartError::ItemNotFound(id.product_id().to_string()))?;

    let mut next = entries.to_vec();
    let previous_quantity = next[index].quantity;
    let product_name = next[index].product.name.clone();
    let was_removed = quantity == 0;

    if was_removed {
        next.remove(index);
    } else {
        next[index].quantity = quantity;
    }

    Ok((
        next,
        SetQuantityOutcome {
            previous_quantity,
            new_quantity: quantity,
            was_removed,
            product_name,
        },
    ))
}

/// Take the ordered quantities out of the cart.
///
/// Only what the order carried is subtracted, so lines added or topped up
/// while the order was being placed stay in the cart.
pub fn settle(entries: &[CartEntry], ordered: &[OrderDraftItem]) -> Vec<CartEntry> {
    let mut next = entries.to_vec();
    for item in ordered {
        if let Some(entry) = next.iter_mut().find(|e| e.product_id == item.product_id) {
            entry.quantity = entry.quantity.saturating_sub(item.quantity);
        }
    }
    next.retain(|e| e.quantity > 0);
    next
}
