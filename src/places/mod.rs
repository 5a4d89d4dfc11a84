//! Places Lookup Module
//!
//! The upstream provider of nearby points of interest. The cache never calls
//! it; the amenity service does so on a cache miss.

mod mock;

use async_trait::async_trait;

use crate::cache::Radius;
use crate::error::LookupError;
use crate::models::{Category, Coordinates, PointOfInterest};

pub use mock::MockPlaces;

/// Finds points of interest of one category around a coordinate.
#[async_trait]
pub trait PlacesLookup: Send + Sync {
    /// Returns places with distance and travel duration filled in.
    ///
    /// Results are not guaranteed to be sorted or capped.
    async fn nearby(
        &self,
        origin: Coordinates,
        category: Category,
        radius: Radius,
    ) -> Result<Vec<PointOfInterest>, LookupError>;
}
