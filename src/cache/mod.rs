//! Response caching.
//!
//! - [`key`]: canonical, parameter-order-independent cache keys.
//! - [`ttl::TtlCache`]: the TTL cache consulted by
//!   [`ApiOptimizer`](crate::ApiOptimizer) before any request reaches the
//!   transport.

pub mod key;
pub mod ttl;

pub use key::{Params, generate_key, namespaced};
pub use ttl::{CacheEntry, CacheStats, DEFAULT_MAX_ENTRIES, DEFAULT_TTL, TtlCache};
