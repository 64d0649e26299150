//! Cart error types.

use thiserror::Error;
use turbo_cache::CacheError;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Malformed input: missing product id, non-positive quantity on add,
    /// negative quantity on set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The cart line does not exist, even after reconciliation.
    #[error("Item not found in cart (ID: {0})")]
    ItemNotFound(String),

    /// Neither cart representation holds any entry.
    #[error("Cart is empty")]
    EmptyCart,

    /// The underlying query cache failed.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// The order service rejected a checkout.
    #[error("Checkout failed: {0}")]
    Checkout(String),
}

impl CartError {
    /// Errors raised inside the read-modify-write section that call for a
    /// resynchronization of both cart representations.
    pub fn is_internal(&self) -> bool {
        matches!(self, CartError::Cache(_))
    }
}
