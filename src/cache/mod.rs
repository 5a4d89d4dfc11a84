//! Cache Module
//!
//! Two-tier amenity cache: an in-process tier that is always present and an
//! optional shared Redis tier, both with TTL expiration.

mod amenity_cache;
mod entry;
mod key;
mod local;
mod remote;
mod stats;
mod tier;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export public types
pub use amenity_cache::AmenityCache;
pub use entry::LocalEntry;
pub use key::{
    namespace_pattern, CacheKey, Radius, SubjectId, DEFAULT_RADIUS_METERS, KEY_NAMESPACE,
    KEY_SEPARATOR,
};
pub use local::LocalTier;
pub use remote::{RedisTier, MAX_CONNECT_ATTEMPTS};
pub use stats::{CacheCounters, CacheStats};
pub use tier::CacheTier;
