//! Session cart state for TurboCommerce storefronts.
//!
//! The cart lives in the browser-side query cache under two keys:
//!
//! - **Entries** (`cartItems`): the authoritative list, one entry per product.
//! - **Lines** (`cart`): a projection of the entries in the shape views and
//!   order payloads expect, with synthetic `memory_<product id>` line ids.
//!
//! Every write replaces both together. Because each key can expire on its own
//! schedule, mutations first reconcile: if the entries are gone but the lines
//! survived, the entries are rebuilt from the lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_cart::prelude::*;
//!
//! let cart = CartService::new(CartConfig::default());
//!
//! let lamp = ProductSnapshot::new("p1", "Desk Lamp", Money::new(2000, Currency::USD));
//! let added = cart.add_to_cart(&lamp, 1).await?;
//! assert!(added.is_new_item);
//!
//! // Views may hand back either id form.
//! cart.set_quantity("memory_p1", 3).await?;
//! cart.remove_from_cart("p1").await?;
//!
//! let query = cart.cart_query();
//! println!("{} items, {}", total_items(&query.data), total_price(&query.data));
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod notice;
pub mod product;

pub use config::CartConfig;
pub use error::CartError;
pub use ids::{CartLineId, OrderId, ProductId, LINE_ID_PREFIX};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::{CartLineId, OrderId, ProductId};
    pub use crate::money::{Currency, Money};
    pub use crate::notice::{CartNotice, NoticeVariant};
    pub use crate::product::ProductSnapshot;

    // Cart
    pub use crate::cart::{
        total_items, total_price, AddOutcome, CartEntry, CartLine, CartQuery, CartService,
        RemoveOutcome, SetQuantityOutcome,
    };

    // Checkout
    pub use crate::checkout::{OrderDraft, OrderSink, PlacedOrder, ShippingAddress};
}
