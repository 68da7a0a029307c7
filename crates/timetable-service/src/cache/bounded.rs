//! Bounded, mutex-guarded key-value cache.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Default number of entries per cache.
pub const DEFAULT_CAPACITY: usize = 10_000;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// Insertion order, oldest first.
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> Inner<K, V> {
    fn forget(&mut self, key: &K) -> Option<Entry<V>> {
        let entry = self.entries.remove(key)?;
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        Some(entry)
    }
}

/// A thread-safe cache with a capacity bound and an optional TTL.
///
/// When full, inserting a new key evicts the oldest entry. Re-inserting an
/// existing key replaces its value and makes it the newest. Expired entries
/// behave as absent and are dropped on access.
pub struct BoundedCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    ttl: Option<Duration>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
            ttl,
        }
    }

    fn is_expired(&self, entry: &Entry<V>) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }

    /// Stores a value, evicting the oldest entry if the cache is full.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        inner.forget(&key);

        while inner.entries.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Returns a clone of the cached value, if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        let expired = match inner.entries.get(key) {
            Some(entry) if self.is_expired(entry) => true,
            Some(entry) => return Some(entry.value.clone()),
            None => return None,
        };
        if expired {
            inner.forget(key);
        }
        None
    }

    /// Returns true if a live entry exists for the key.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes an entry, returning its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().forget(key).map(|entry| entry.value)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    /// Number of stored entries, including expired ones not yet dropped.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, None)
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
