/// Point-in-time snapshot of a cache's access counters.
///
/// Counters are cumulative over the lifetime of the cache. Obtain a snapshot
/// with [`crate::Cache::stats`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Stats {
    pub hit_count: u64,
    pub miss_count: u64,
    pub eviction_count: u64,
}

/// Live counters, maintained inside the cache's critical section, so plain
/// integers suffice.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) hit_count: u64,
    pub(crate) miss_count: u64,
    pub(crate) eviction_count: u64,
}

impl Counters {
    pub(crate) fn snapshot(&self) -> Stats {
        Stats {
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            eviction_count: self.eviction_count,
        }
    }
}
