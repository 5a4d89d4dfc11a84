//! Domain types and request/response models
//!
//! `amenity` holds the cached domain types; `requests` and `responses` are
//! the DTOs serialized over HTTP.

pub mod amenity;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use amenity::{
    rank_by_distance, Category, Coordinates, PointOfInterest, UnknownCategory,
    MAX_PLACES_PER_CATEGORY,
};
pub use requests::{AmenityQuery, LocationRequest};
pub use responses::{
    HealthResponse, ListingSummary, MessageResponse, NearbyAmenities, StatsResponse,
};
