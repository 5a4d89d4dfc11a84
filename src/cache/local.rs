//! Local Tier Module
//!
//! In-process amenity store with lazy expiry on read and an explicit purge
//! used by the sweep task.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::entry::{current_timestamp_ms, LocalEntry};
use crate::cache::CacheTier;
use crate::error::TierError;
use crate::models::PointOfInterest;

// == Local Tier ==
/// Always-available in-memory tier.
///
/// The lock only guards map work and is never held across an await on
/// anything else.
#[derive(Debug, Default)]
pub struct LocalTier {
    entries: RwLock<HashMap<String, LocalEntry>>,
}

impl LocalTier {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the places stored under `key`, or None if missing or expired.
    ///
    /// Expired entries are left for the sweep to remove.
    pub async fn get(&self, key: &str) -> Option<Vec<PointOfInterest>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.places.clone())
    }

    // == Insert ==
    /// Stores places under `key`, replacing any previous entry and its TTL.
    pub async fn insert(&self, key: String, places: Vec<PointOfInterest>, ttl_seconds: u64) {
        let entry = LocalEntry::new(places, ttl_seconds);
        self.entries.write().await.insert(key, entry);
    }

    // == Remove Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    pub async fn remove_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    // == Clear ==
    /// Drops every entry, returning how many were held.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = current_timestamp_ms();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count()
    }
}

#[async_trait]
impl CacheTier for LocalTier {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<PointOfInterest>>, TierError> {
        Ok(LocalTier::get(self, key).await)
    }

    async fn set(
        &self,
        key: &str,
        places: &[PointOfInterest],
        ttl_seconds: u64,
    ) -> Result<(), TierError> {
        self.insert(key.to_string(), places.to_vec(), ttl_seconds).await;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize, TierError> {
        Ok(LocalTier::remove_prefix(self, prefix).await)
    }
}
