//! Keyed query cache with automatic serialization.

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{CacheError, CachePolicy};

/// A stored value and the moment it was written.
#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    written_at: Instant,
}

/// Type-safe in-process cache keyed by query name.
///
/// Values are stored as JSON so any type that implements `Serialize` and
/// `DeserializeOwned` can be cached. Every key may carry its own
/// [`CachePolicy`]; expired values are dropped lazily on the next read.
#[derive(Debug, Default)]
pub struct QueryCache {
    slots: Mutex<HashMap<String, Slot>>,
    policies: HashMap<String, CachePolicy>,
}

impl QueryCache {
    /// Create an empty cache where every key lives for the whole session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an expiry policy to a key.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = QueryCache::new()
    ///     .with_policy("cart", CachePolicy::expire_after(Duration::from_secs(300)));
    /// ```
    pub fn with_policy(mut self, key: impl Into<String>, policy: CachePolicy) -> Self {
        self.policies.insert(key.into(), policy);
        self
    }

    /// Get the policy governing a key.
    pub fn policy(&self, key: &str) -> CachePolicy {
        self.policies.get(key).copied().unwrap_or_default()
    }

    /// Lock the cache for a sequence of reads and writes.
    ///
    /// No other caller can observe or modify the cache until the returned
    /// guard is dropped, so a read-modify-write done through one guard is
    /// never interleaved with another.
    pub fn lock(&self) -> CacheGuard<'_> {
        CacheGuard {
            slots: self.slots.lock(),
            policies: &self.policies,
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<CartLine>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        self.lock().get(key)
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.lock().set(key, value)
    }

    /// Remove a value, returning whether a live value was present.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key)
    }

    /// Check if a live value exists for a key.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    /// Get all keys holding a live value.
    pub fn keys(&self) -> Vec<String> {
        let mut guard = self.lock();
        guard.purge_expired();
        let mut keys: Vec<String> = guard.slots.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Exclusive access to a [`QueryCache`].
pub struct CacheGuard<'a> {
    slots: MutexGuard<'a, HashMap<String, Slot>>,
    policies: &'a HashMap<String, CachePolicy>,
}

impl CacheGuard<'_> {
    /// Get a value, dropping it first if its policy says it has expired.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, CacheError> {
        match self.live(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| CacheError::DecodeError {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = encode(value)?;
        self.put(key, value);
        Ok(())
    }

    /// Store an already-encoded value. Never fails.
    pub fn put(&mut self, key: &str, value: Value) {
        self.slots.insert(
            key.to_string(),
            Slot {
                value,
                written_at: Instant::now(),
            },
        );
    }

    /// Remove a value, returning whether a live value was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let live = self.live(key).is_some();
        self.slots.remove(key);
        live
    }

    /// Check if a live value exists for a key.
    pub fn contains(&mut self, key: &str) -> bool {
        self.live(key).is_some()
    }

    fn live(&mut self, key: &str) -> Option<&Value> {
        let policy = self.policies.get(key).copied().unwrap_or_default();
        let expired = self
            .slots
            .get(key)
            .is_some_and(|slot| policy.is_expired(slot.written_at, Instant::now()));

        if expired {
            tracing::debug!(key, "cached value expired");
            self.slots.remove(key);
        }
        self.slots.get(key).map(|slot| &slot.value)
    }

    fn purge_expired(&mut self) {
        let now = Instant::now();
        let policies = self.policies;
        self.slots.retain(|key, slot| {
            !policies
                .get(key)
                .copied()
                .unwrap_or_default()
                .is_expired(slot.written_at, now)
        });
    }
}

/// Serialize a value the way the cache stores it.
///
/// Encoding several values up front and then calling [`CacheGuard::put`] for
/// each lets a caller replace multiple keys without a half-written state when
/// one of the encodings fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Value, CacheError> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        quantity: i64,
    }

    fn item(id: &str, quantity: i64) -> Item {
        Item {
            id: id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_set_and_get() {
        let cache = QueryCache::new();
        cache.set("items", &vec![item("a", 1)]).unwrap();

        let items: Option<Vec<Item>> = cache.get("items").unwrap();
        assert_eq!(items, Some(vec![item("a", 1)]));
    }

    #[test]
    fn test_missing_key() {
        let cache = QueryCache::new();
        let items: Option<Vec<Item>> = cache.get("nope").unwrap();
        assert!(items.is_none());
        assert!(!cache.contains("nope"));
    }

    #[test]
    fn test_remove() {
        let cache = QueryCache::new();
        cache.set("items", &vec![item("a", 1)]).unwrap();

        assert!(cache.remove("items"));
        assert!(!cache.remove("items"));
        assert!(!cache.contains("items"));
    }

    #[test]
    fn test_decode_error_names_key() {
        let cache = QueryCache::new();
        cache.set("items", &"not a list").unwrap();

        let err = cache.get::<Vec<Item>>("items").unwrap_err();
        match err {
            CacheError::DecodeError { key, .. } => assert_eq!(key, "items"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_keys_expire_independently() {
        let cache = QueryCache::new()
            .with_policy("short", CachePolicy::expire_after(Duration::ZERO))
            .with_policy("long", CachePolicy::session());

        {
            let mut guard = cache.lock();
            guard.set("short", &1).unwrap();
            guard.set("long", &2).unwrap();
        }

        assert_eq!(cache.get::<i32>("short").unwrap(), None);
        assert_eq!(cache.get::<i32>("long").unwrap(), Some(2));
        assert_eq!(cache.keys(), vec!["long".to_string()]);
    }

    #[test]
    fn test_put_encoded_values() {
        let cache = QueryCache::new();
        let a = encode(&vec![item("a", 1)]).unwrap();
        let b = encode(&3_i64).unwrap();

        {
            let mut guard = cache.lock();
            guard.put("a", a);
            guard.put("b", b);
        }

        assert_eq!(cache.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cache.get::<i64>("b").unwrap(), Some(3));
    }

    #[test]
    fn test_policy_lookup_defaults_to_session() {
        let cache = QueryCache::new();
        assert_eq!(cache.policy("anything"), CachePolicy::session());
    }
}
