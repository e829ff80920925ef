//! Memoization of per-subject results, bucketed by local calendar day.

pub mod backend;
pub mod clock;
pub mod key;
pub mod store;

pub use backend::{CacheBackend, CacheEntry, CacheError, MemoryBackend};
pub use clock::LocalClock;
pub use key::{parse_bucket_date, CacheKey, ComputationKind, SCHEMA_VERSION};
pub use store::{CacheStats, DailyCache};
