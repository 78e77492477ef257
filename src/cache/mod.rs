//! Tag-based response caching.
//!
//! Read categories are tiered by volatility: user and complaint lists
//! refresh every minute, first-order aggregates every five minutes, and
//! the expensive second-order aggregates (clustering, topic modeling)
//! hourly. Writes invalidate a predetermined closure of tags rather than
//! tracking fine-grained dependencies, since the backend exposes none.

pub mod registry;
pub mod store;

pub use registry::{CacheRegistry, CacheTag, FetchDirective, MutationKind, ReadCategory};
pub use store::ResponseCache;
