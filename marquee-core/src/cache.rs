//! Process-lifetime TTL cache for third-party lookups.
//!
//! Entries expire a fixed time after insertion and are only replaced on the next
//! access. There is no size bound and no background eviction. Concurrent misses for
//! the same key may each fetch; the last insert wins.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Time-to-live used for standings and player lookups.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Used to exercise expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct CacheEntry<V> {
    value: Arc<V>,
    stored_at: Instant,
}

pub struct TtlCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh value for `key`, if any. Expired entries are left for the next insert.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let now = self.clock.now();
        self.entries()
            .get(key)
            .filter(|entry| now.duration_since(entry.stored_at) < self.ttl)
            .map(|entry| Arc::clone(&entry.value))
    }

    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let entry = CacheEntry {
            value: Arc::clone(&value),
            stored_at: self.clock.now(),
        };
        self.entries().insert(key, entry);
        value
    }

    /// Return the cached value or run `fetch` and cache its result.
    ///
    /// The lock is never held across the fetch. Errors are returned as-is and
    /// nothing is cached for them.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let value = fetch().await?;
        Ok(self.insert(key, value))
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expires_at_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<&str, u32> = TtlCache::with_clock(Duration::from_secs(10), clock.clone());

        cache.insert("k", 7);
        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get(&"k").as_deref(), Some(&7));

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&"k").is_none());
        assert_eq!(cache.len(), 1, "expired entries are not evicted eagerly");
    }
}
