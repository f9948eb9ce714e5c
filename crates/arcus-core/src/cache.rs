use derive_more::{AsRef, Deref, Display, From, Into};
use std::collections::{HashMap, VecDeque};

/// Identifies one rendered bitmap: every visual parameter that influences the
/// pixels is formatted into the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct CacheKey(String);

crate::impl_string_newtype!(CacheKey);

/// Default byte budget: 10 MiB.
pub const DEFAULT_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub bytes: usize,
}

struct Entry<V> {
    value: V,
    cost: usize,
}

/// Keyed bitmap store shared by every widget on the thread that owns it.
///
/// Entries are evicted least-recently-used first once the byte budget is
/// exceeded; a hit counts as a use. An entry larger than the whole budget is
/// still kept until the next insertion.
pub struct PixmapCache<V> {
    entries: HashMap<CacheKey, Entry<V>>,
    order: VecDeque<CacheKey>,
    limit: usize,
    bytes: usize,
    hits: u64,
    misses: u64,
}

impl<V: Clone> PixmapCache<V> {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT_BYTES)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            limit,
            bytes: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn find(&mut self, key: &CacheKey) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits += 1;
                let value = entry.value.clone();
                self.touch(key);
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn touch(&mut self, key: &CacheKey) {
        if self.order.back() != Some(key) {
            self.order.retain(|k| k != key);
            self.order.push_back(key.clone());
        }
    }

    pub fn insert(&mut self, key: CacheKey, value: V, cost: usize) {
        if let Some(old) = self.entries.remove(&key) {
            self.bytes -= old.cost;
            self.order.retain(|k| k != &key);
        }

        while self.bytes + cost > self.limit {
            let Some(stale) = self.order.pop_front() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&stale) {
                self.bytes -= evicted.cost;
            }
        }

        self.bytes += cost;
        self.order.push_back(key.clone());
        self.entries.insert(key, Entry { value, cost });
    }

    /// Returns the cached value for `key`, building and inserting it on a
    /// miss. `build` reports the value together with its size in bytes.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: &CacheKey,
        build: impl FnOnce() -> Result<(V, usize), E>,
    ) -> Result<V, E> {
        if let Some(value) = self.find(key) {
            return Ok(value);
        }
        log::debug!("pixmap cache miss: {}", key);
        let (value, cost) = build()?;
        self.insert(key.clone(), value.clone(), cost);
        Ok(value)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.bytes = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
            bytes: self.bytes,
        }
    }
}

impl<V: Clone> Default for PixmapCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
