//! Shopping cart module.
//!
//! Contains the authoritative entry store, its projected cart lines, the
//! mutations applied to them, cache reconciliation and the async service
//! views talk to.

mod entry;
mod mutation;
mod reconcile;
mod service;
mod store;
mod totals;

pub use entry::{project, unproject, CartEntry, CartLine};
pub use mutation::{
    add, locate, remove, set_quantity, settle, validate_add, validate_set_quantity, AddOutcome,
    RemoveOutcome, SetQuantityOutcome,
};
pub use reconcile::{reconcile, Reconciled};
pub use service::{CartQuery, CartService};
pub use store::{CartSnapshot, CartStore, CartTxn, ENTRIES_KEY, LINES_KEY};
pub use totals::{total_items, total_price};
