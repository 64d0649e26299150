//! The cart store: authoritative entries plus their projected mirror, both
//! kept in the host query cache.

use std::sync::Arc;

use turbo_cache::{encode, CacheGuard, CachePolicy, QueryCache};

use crate::cart::entry::{project, CartEntry, CartLine};
use crate::error::CartError;

/// Cache key of the authoritative entry list.
pub const ENTRIES_KEY: &str = "cartItems";
/// Cache key of the projected cart line list.
pub const LINES_KEY: &str = "cart";

/// Both cart representations as found in the cache at one instant.
///
/// `None` means the slot is absent or has expired, which is different from a
/// committed empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub entries: Option<Vec<CartEntry>>,
    pub lines: Option<Vec<CartLine>>,
}

/// Handle to the cart held in a shared [`QueryCache`].
///
/// Every write replaces the entries and their projection together, so readers
/// never see one updated without the other.
#[derive(Debug, Clone)]
pub struct CartStore {
    cache: Arc<QueryCache>,
}

impl CartStore {
    /// Wrap an existing cache.
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self { cache }
    }

    /// Create a store on a fresh cache with one expiry policy per
    /// representation.
    pub fn with_policies(entries: CachePolicy, lines: CachePolicy) -> Self {
        let cache = QueryCache::new()
            .with_policy(ENTRIES_KEY, entries)
            .with_policy(LINES_KEY, lines);
        Self::new(Arc::new(cache))
    }

    /// The underlying cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Lock both representations for a read-modify-write.
    pub fn lock(&self) -> CartTxn<'_> {
        CartTxn {
            guard: self.cache.lock(),
        }
    }

    /// Read the authoritative entries; an absent slot reads as empty.
    pub fn read(&self) -> Result<Vec<CartEntry>, CartError> {
        Ok(self.lock().entries()?.unwrap_or_default())
    }

    /// Replace the entries and their projection.
    pub fn write(&self, entries: &[CartEntry]) -> Result<(), CartError> {
        self.lock().commit(entries).map(|_| ())
    }

    /// Read the cart lines views render.
    ///
    /// When the mirror has expired but the entries are still cached, the
    /// mirror is re-derived and written back. When both are gone the cart
    /// reads as empty and nothing is written.
    pub fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        let mut txn = self.lock();
        if let Some(lines) = txn.lines()? {
            return Ok(lines);
        }
        match txn.entries()? {
            Some(entries) => txn.commit(&entries),
            None => Ok(Vec::new()),
        }
    }
}

/// Exclusive access to both cart representations.
pub struct CartTxn<'a> {
    guard: CacheGuard<'a>,
}

impl CartTxn<'_> {
    /// The authoritative entries, if cached.
    pub fn entries(&mut self) -> Result<Option<Vec<CartEntry>>, CartError> {
        Ok(self.guard.get(ENTRIES_KEY)?)
    }

    /// The mirror lines, if cached.
    pub fn lines(&mut self) -> Result<Option<Vec<CartLine>>, CartError> {
        Ok(self.guard.get(LINES_KEY)?)
    }

    /// Read both representations.
    pub fn snapshot(&mut self) -> Result<CartSnapshot, CartError> {
        Ok(CartSnapshot {
            entries: self.entries()?,
            lines: self.lines()?,
        })
    }

    /// Replace both representations, returning the new lines.
    ///
    /// Both values are encoded before either slot is touched.
    pub fn commit(&mut self, entries: &[CartEntry]) -> Result<Vec<CartLine>, CartError> {
        let lines = project(entries);
        let encoded_entries = encode(&entries)?;
        let encoded_lines = encode(&lines)?;

        self.guard.put(ENTRIES_KEY, encoded_entries);
        self.guard.put(LINES_KEY, encoded_lines);
        Ok(lines)
    }

    /// Drop the authoritative slot.
    pub fn forget_entries(&mut self) -> bool {
        self.guard.remove(ENTRIES_KEY)
    }

    /// Drop the mirror slot.
    pub fn forget_lines(&mut self) -> bool {
        self.guard.remove(LINES_KEY)
    }
}
