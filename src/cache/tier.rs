//! Cache Tier Module
//!
//! The storage seam shared by the in-process and remote tiers.

use async_trait::async_trait;

use crate::error::TierError;
use crate::models::PointOfInterest;

/// A key-value store of amenity lists with per-key expiry.
///
/// Keys are full storage tokens (see [`super::CacheKey::storage_key`]).
/// Prefixes passed to [`CacheTier::remove_prefix`] never contain glob
/// metacharacters.
#[async_trait]
pub trait CacheTier: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<Vec<PointOfInterest>>, TierError>;

    async fn set(
        &self,
        key: &str,
        places: &[PointOfInterest],
        ttl_seconds: u64,
    ) -> Result<(), TierError>;

    /// Removes every key starting with `prefix`, returning how many went.
    async fn remove_prefix(&self, prefix: &str) -> Result<usize, TierError>;
}
