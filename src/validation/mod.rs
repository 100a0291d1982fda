//! Record validation and result aggregation.
//!
//! Everything here is pure and synchronous: the same contact snapshot
//! always yields the same ordered errors, so results can be recomputed on
//! every render without caching.

pub mod record;
pub mod summary;

pub use record::{validate, validate_all};
pub use summary::{summarize, ScopedStats, StatsScope, Summary};
