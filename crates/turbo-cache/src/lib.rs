//! In-process query cache for TurboCommerce storefronts.
//!
//! Provides a simple, ergonomic API for caching view data with automatic JSON
//! serialization and independent per-key expiry.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_cache::{CachePolicy, QueryCache};
//! use std::time::Duration;
//!
//! let cache = QueryCache::new()
//!     .with_policy("cart", CachePolicy::expire_after(Duration::from_secs(300)));
//!
//! // Store a value
//! cache.set("cart", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<CartLine>> = cache.get("cart")?;
//!
//! // Read-modify-write under one lock
//! let mut guard = cache.lock();
//! let count: Option<u32> = guard.get("count")?;
//! guard.set("count", &(count.unwrap_or(0) + 1))?;
//! ```

mod error;
mod policy;
mod query;

pub use error::CacheError;
pub use policy::CachePolicy;
pub use query::{encode, CacheGuard, QueryCache};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, CacheGuard, CachePolicy, QueryCache};
}
