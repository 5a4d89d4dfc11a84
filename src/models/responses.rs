//! Response DTOs for the amenity API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Category, Coordinates, PointOfInterest};

/// Listing fields echoed back with an amenity lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub coordinates: Coordinates,
}

/// Response body for `GET /properties/{id}/nearby-amenities`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyAmenities {
    pub property: ListingSummary,
    /// Ranked places per requested category
    pub amenities: BTreeMap<Category, Vec<PointOfInterest>>,
    /// Radius in meters the lookup used
    pub search_radius: u32,
    /// RFC 3339 time the response was assembled
    pub timestamp: String,
}

/// Response body for `GET /cache/stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Plain acknowledgement for mutating endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheCounters;

    #[test]
    fn test_stats_response_flattens_stats() {
        let counters = CacheCounters::new();
        counters.record_local_hit();
        counters.record_miss();

        let json = serde_json::to_value(StatsResponse::from(counters.snapshot(false, 2))).unwrap();

        assert_eq!(json["localEntryCount"], 2);
        assert_eq!(json["remoteAvailable"], false);
        assert_eq!(json["hitRate"], 0.5);
    }

    #[test]
    fn test_nearby_amenities_keys_are_category_names() {
        let mut amenities = BTreeMap::new();
        amenities.insert(Category::GasStation, Vec::new());
        let resp = NearbyAmenities {
            property: ListingSummary {
                id: "1".to_string(),
                title: "Flat".to_string(),
                coordinates: Coordinates::new(1.0, 2.0),
            },
            amenities,
            search_radius: 5000,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["amenities"]["gas_station"].is_array());
        assert_eq!(json["searchRadius"], 5000);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
