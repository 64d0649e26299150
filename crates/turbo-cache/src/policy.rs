//! Per-key expiry policies.

use std::time::{Duration, Instant};

/// How long a cached value stays readable after it was last written.
///
/// Each key carries its own policy, so two keys written together can expire
/// independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CachePolicy {
    /// Time-to-live measured from the last write. `None` keeps the value for
    /// the lifetime of the cache.
    pub ttl: Option<Duration>,
}

impl CachePolicy {
    /// Keep values until they are removed or overwritten.
    pub fn session() -> Self {
        Self { ttl: None }
    }

    /// Expire values `ttl` after their last write.
    pub fn expire_after(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }

    /// Build a policy from an optional number of seconds.
    pub fn from_secs(secs: Option<u64>) -> Self {
        secs.map(Duration::from_secs)
            .map(Self::expire_after)
            .unwrap_or_default()
    }

    /// Check whether a value written at `written_at` has expired at `now`.
    pub fn is_expired(&self, written_at: Instant, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(written_at) >= ttl,
            None => false,
        }
    }
}
