use crate::Stats;
use crate::cache::stats::Counters;
use parking_lot::Mutex;
use recency_list::RecencyList;
use slot::{Slot, SlotIndex};
use slot_arena::SlotArena;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

mod recency_list;
mod slot;
mod slot_arena;
pub(crate) mod stats;

pub(crate) type RandomState = ahash::RandomState;

/// Thread-safe cache with a fixed capacity and strict least-recently-used
/// eviction.
///
/// Entries live in a slot arena allocated once at construction; the recency
/// order is an intrusive doubly linked list threaded through the arena, and
/// a key index gives O(1) lookup. Every operation runs under a single
/// [`parking_lot::Mutex`], so the combined effect of concurrent calls is
/// always equivalent to some serial ordering of those calls.
///
/// A `Mutex` rather than an `RwLock` on purpose: a cache hit promotes the
/// entry to the front of the recency list, so even `get` needs exclusive
/// access. This crate does not use any unsafe code.
///
/// Wrap the cache in a [`std::sync::Arc`] to share it between threads. All
/// operations only require a shared reference to the cache.
#[derive(Debug)]
pub struct Cache<K, V, S = RandomState> {
    capacity: usize,
    inner: Mutex<LruInner<K, V, S>>,
}

impl<K, V> Cache<K, V, RandomState>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache with the specified capacity.
    ///
    /// A capacity of zero is allowed; such a cache stores nothing.
    pub fn with_capacity(capacity: usize) -> Cache<K, V, RandomState> {
        Cache::with_capacity_and_hasher(capacity, Default::default())
    }

    /// Creates a cache with the specified capacity and fills it as if by
    /// calling [`Cache::insert`] for each pair in iteration order.
    ///
    /// The last pair ends up as the most recently used entry. If the
    /// sequence is longer than `capacity`, the earliest pairs are evicted by
    /// the normal rule; duplicate keys behave as successive overwrites.
    pub fn from_entries<I>(capacity: usize, entries: I) -> Cache<K, V, RandomState>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut inner = LruInner::with_capacity_and_hasher(capacity, Default::default());

        for (key, value) in entries {
            inner.insert(key, value);
        }

        Cache {
            capacity,
            inner: Mutex::new(inner),
        }
    }
}

impl<K, V, S> Cache<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    /// Creates an empty cache with the specified capacity, using
    /// `hash_builder` to hash the keys.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Cache<K, V, S> {
        Cache {
            capacity,
            inner: Mutex::new(LruInner::with_capacity_and_hasher(capacity, hash_builder)),
        }
    }

    /// Returns the value corresponding to the key and promotes the entry to
    /// most recently used. The relative order of all other entries is
    /// unchanged. A miss changes nothing.
    ///
    /// This method clones the value when returning it. Consider wrapping
    /// your values in [`std::sync::Arc`] if cloning is too expensive for
    /// your use-case.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key)
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key is already present, its value is overwritten and the entry
    /// is promoted to most recently used; nothing is evicted and [`None`] is
    /// returned.
    ///
    /// If the key is new and the cache is full, the least recently used
    /// entry is evicted to make room and returned. Eviction and insertion
    /// happen atomically: no concurrent caller can observe the cache above
    /// capacity or with both entries present.
    pub fn insert(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().insert(key, value)
    }

    /// Returns the value corresponding to the key without promoting the
    /// entry.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().peek(key)
    }

    /// Returns `true` if the cache holds an entry for the key, without
    /// promoting it.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains_key(key)
    }

    /// Returns all entries ordered from most to least recently used.
    ///
    /// The snapshot is taken in one critical section, so it is consistent
    /// even while other threads are mutating the cache. Enumeration does not
    /// promote any entry.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.inner.lock().entries()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.inner.lock().check_invariants();
    }
}

impl<K, V, S> Cache<K, V, S> {
    /// Returns the number of entries currently in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed capacity the cache was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a snapshot of the cumulative hit/miss/eviction counters.
    pub fn stats(&self) -> Stats {
        self.inner.lock().counters.snapshot()
    }
}

/// All mutable state, owned exclusively by the facade's lock.
#[derive(Debug)]
struct LruInner<K, V, S> {
    index: HashMap<K, SlotIndex, S>,
    arena: SlotArena<K, V>,
    list: RecencyList,
    counters: Counters,
}

impl<K, V, S> LruInner<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> LruInner<K, V, S> {
        LruInner {
            index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            arena: SlotArena::with_capacity(capacity),
            list: RecencyList::new(),
            counters: Counters::default(),
        }
    }

    fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&index) = self.index.get(key) else {
            self.counters.miss_count += 1;
            return None;
        };

        self.counters.hit_count += 1;
        self.list.move_to_front(&mut self.arena, index);

        let slot = self
            .arena
            .get(index)
            .expect("an indexed key must have an occupied slot");
        Some(slot.value.clone())
    }

    fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&index) = self.index.get(&key) {
            let slot = self
                .arena
                .get_mut(index)
                .expect("an indexed key must have an occupied slot");
            slot.value = value;
            self.list.move_to_front(&mut self.arena, index);
            return None;
        }

        if self.arena.capacity() == 0 {
            return None;
        }

        let evicted = if self.arena.is_full() {
            self.evict_least_recent()
        } else {
            None
        };

        let index = self
            .arena
            .insert(Slot::detached(key.clone(), value))
            .expect("a cell must be free after eviction");
        self.list.push_front(&mut self.arena, index);
        self.index.insert(key, index);

        evicted
    }

    fn evict_least_recent(&mut self) -> Option<(K, V)> {
        let tail = self.list.pop_back(&mut self.arena)?;
        let slot = self
            .arena
            .remove(tail)
            .expect("the list tail must have an occupied slot");

        self.index.remove(&slot.key);
        self.counters.eviction_count += 1;

        Some((slot.key, slot.value))
    }

    fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &index = self.index.get(key)?;
        let slot = self
            .arena
            .get(index)
            .expect("an indexed key must have an occupied slot");
        Some(slot.value.clone())
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.list
            .iter(&self.arena)
            .map(|slot| (slot.key.clone(), slot.value.clone()))
            .collect()
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        use crate::cache::slot::NIL;

        assert!(self.arena.len() <= self.arena.capacity());
        assert_eq!(self.arena.len(), self.index.len());
        assert_eq!(self.arena.len(), self.list.len());

        let mut seen = 0;
        let mut prev = NIL;
        let mut cursor = self.list.head();

        while cursor != NIL {
            assert!(seen < self.list.len(), "recency list must be acyclic");

            let slot = self
                .arena
                .get(cursor)
                .expect("a linked slot must be occupied");
            assert_eq!(slot.prev, prev);
            assert_eq!(self.index.get(&slot.key).copied(), Some(cursor));

            prev = cursor;
            cursor = slot.next;
            seen += 1;
        }

        assert_eq!(seen, self.list.len());
        assert_eq!(self.list.tail(), prev);
    }
}
