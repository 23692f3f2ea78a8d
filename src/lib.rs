//! A thread-safe cache with a fixed capacity and strict least-recently-used
//! eviction.
//!
//! This crate provides an LRU cache meant for memoizing expensive keyed
//! computations (formatting results, symbol lookups) without unbounded
//! memory growth. Entries live in a slot arena allocated once up front;
//! recency order is an intrusive doubly linked list threaded through the
//! arena, giving O(1) `get`/`insert` with no per-entry allocations.
//!
//! # Features
//!
//! - Thread-safe by default - no need for explicit synchronization
//! - Exact LRU semantics: every hit and every overwrite promotes the entry
//! - Fixed-size arena backing store - no allocation after construction
//! - No unsafe code
//!
//! # Safety
//!
//! This crate is designed to be safe and easy to use:
//!
//! - No unsafe code is used
//! - Thread-safe by default when wrapped in `Arc`
//! - All operations are atomic; concurrent callers always observe the cache
//!   at or below capacity
//!
//! # Examples
//!
//! Basic usage with string keys and values:
//!
//! ```rust
//! use recency_cache::Cache;
//!
//! // Create a new cache that holds at most 1000 entries
//! let cache = Cache::with_capacity(1000);
//!
//! // Insert and retrieve a value
//! cache.insert("key1", "value1");
//! assert_eq!(cache.get("key1"), Some("value1"));
//! ```
//!
//! Eviction hands back the displaced pair:
//!
//! ```rust
//! use recency_cache::Cache;
//!
//! let cache = Cache::with_capacity(2);
//! cache.insert("one", 1);
//! cache.insert("two", 2);
//!
//! // Reading "one" makes "two" the least recently used entry
//! cache.get("one");
//!
//! let evicted = cache.insert("three", 3);
//! assert_eq!(evicted, Some(("two", 2)));
//! assert_eq!(cache.get("two"), None);
//! ```
//!
//! Thread-safe usage across multiple threads:
//!
//! ```rust
//! use recency_cache::Cache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(Cache::with_capacity(100));
//! cache.insert("key1", "value1");
//!
//! // Spawn a thread that inserts a value
//! let cache_in_arc = Arc::clone(&cache);
//! let handle = thread::spawn(move || {
//!     cache_in_arc.insert("key2", "value2");
//! });
//!
//! handle.join().unwrap();
//!
//! assert_eq!(cache.get("key1"), Some("value1"));
//! assert_eq!(cache.get("key2"), Some("value2"));
//! ```

#![forbid(unsafe_code)]
pub mod cache;

pub use cache::Cache;
pub use cache::stats::Stats;
