//! # lrustore
//!
//! Fixed-capacity key-value store with least-recently-used eviction.
//!
//! ## Architecture
//! - **HashMap**: AHash map from key to slab slot for O(1) lookup
//! - **Recency list**: doubly-linked list threaded through the slab by index,
//!   least recently used at the head, for O(1) promotion and eviction
//! - **SharedLruStore**: optional mutex-guarded handle with hit/miss stats
//!
//! ```
//! use lrustore::LruStore;
//!
//! let mut store = LruStore::new(2)?;
//! store.put(1, "aaa");
//! store.put(2, "bbb");
//! store.get(&1);
//! store.put(3, "ccc"); // evicts 2
//!
//! assert_eq!(store.get(&2), None);
//! assert_eq!(store.len(), 2);
//! # Ok::<(), lrustore::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod lru;
mod shared;
mod stats;

pub use error::{Error, Result};
pub use lru::{Iter, LruStore};
pub use shared::SharedLruStore;
pub use stats::CacheStats;
