//! Local Entry Module
//!
//! A cached amenity list held by the in-process tier, with its expiry.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::PointOfInterest;

// == Local Entry ==
/// One amenity list stored in the local tier.
#[derive(Debug, Clone)]
pub struct LocalEntry {
    /// Ranked places, stored as given
    pub places: Vec<PointOfInterest>,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl LocalEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn new(places: Vec<PointOfInterest>, ttl_seconds: u64) -> Self {
        Self {
            places,
            expires_at: current_timestamp_ms().saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
