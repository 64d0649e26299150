//! Checkout module.
//!
//! Turns the current cart lines into an order payload and hands it to the
//! external order service.

mod address;
mod order;

pub use address::ShippingAddress;
pub use order::{OrderDraft, OrderDraftItem, OrderSink, OrderStatus, PlacedOrder};
