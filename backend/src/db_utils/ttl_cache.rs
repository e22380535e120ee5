//! Process-wide, expiry-refreshed cache shared by facet and result lookups.

use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

/// One hour, the revalidation window of catalog data.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Holds at most `capacity` entries; the least recently used one is evicted first.
    Enabled { ttl: Duration, capacity: NonZeroUsize },
    /// Every lookup goes to the source; used for interactive development.
    Disabled,
}

impl CacheMode {
    pub fn with_ttl(ttl: Duration) -> Self {
        CacheMode::Enabled { ttl, capacity: DEFAULT_CACHE_CAPACITY }
    }
}

impl Default for CacheMode {
    fn default() -> Self {
        CacheMode::with_ttl(DEFAULT_CACHE_TTL)
    }
}

/// Entries are never invalidated, only replaced once they expire or evicted.
pub struct TtlCache<K: Hash + Eq, V> {
    ttl: Option<Duration>,
    entries: Option<Mutex<LruCache<K, (Instant, V)>>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(mode: CacheMode) -> Self {
        match mode {
            CacheMode::Enabled { ttl, capacity } => {
                Self { ttl: Some(ttl), entries: Some(Mutex::new(LruCache::new(capacity))) }
            }
            CacheMode::Disabled => Self { ttl: None, entries: None },
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<K, (Instant, V)>>> {
        let entries = self.entries.as_ref()?;
        Some(match entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        })
    }

    /// Fresh value for `key`, if any. Expired entries are dropped on the way.
    pub fn get(&self, key: &K) -> Option<V> {
        let ttl = self.ttl?;
        let mut entries = self.lock()?;
        let (stored_at, value) = entries.get(key)?;
        if stored_at.elapsed() < ttl {
            return Some(value.clone());
        }
        entries.pop(key);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        if let Some(mut entries) = self.lock() {
            entries.put(key, (Instant::now(), value));
        }
    }

    /// Returns the cached value or loads, stores and returns a new one.
    /// Load failures are not cached.
    pub async fn get_or_try_load<F, Fut>(&self, key: K, load: F) -> anyhow::Result<(V, bool)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok((value, true));
        }
        let value = load().await?;
        self.insert(key, value.clone());
        Ok((value, false))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().map_or(0, |entries| entries.len())
    }
}
