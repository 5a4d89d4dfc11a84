//! Listing Directory
//!
//! In-memory listing records the amenity service looks coordinates up in.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::Coordinates;

/// The parts of a property listing the amenity lookup needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub city: String,
    pub coordinates: Option<Coordinates>,
}

impl Listing {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        city: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            city: city.into(),
            coordinates,
        }
    }
}

/// Concurrent map of listings keyed by id.
#[derive(Debug, Default)]
pub struct ListingDirectory {
    listings: RwLock<HashMap<String, Listing>>,
}

impl ListingDirectory {
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: RwLock::new(listings.into_iter().map(|l| (l.id.clone(), l)).collect()),
        }
    }

    /// Directory preloaded with the demo catalog.
    pub fn seeded() -> Self {
        Self::new([
            Listing::new(
                "1",
                "Luxury 3BHK Apartment in Bandra",
                "Mumbai",
                Some(Coordinates::new(19.0596, 72.8295)),
            ),
            Listing::new(
                "2",
                "Modern 2BHK House in Pune",
                "Pune",
                Some(Coordinates::new(18.5204, 73.8567)),
            ),
            Listing::new(
                "3",
                "Spacious Villa in Goa",
                "Goa",
                Some(Coordinates::new(15.2993, 74.1240)),
            ),
            Listing::new(
                "4",
                "Commercial Space in Delhi",
                "Delhi",
                Some(Coordinates::new(28.7041, 77.1025)),
            ),
            Listing::new("5", "Residential Plot in Bangalore", "Bangalore", None),
        ])
    }

    pub async fn get(&self, id: &str) -> Option<Listing> {
        self.listings.read().await.get(id).cloned()
    }

    /// Sets a listing's coordinates, returning the updated record.
    pub async fn update_location(&self, id: &str, coordinates: Coordinates) -> Option<Listing> {
        let mut listings = self.listings.write().await;
        let listing = listings.get_mut(id)?;
        listing.coordinates = Some(coordinates);
        Some(listing.clone())
    }

    /// Removes a listing, returning whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        self.listings.write().await.remove(id).is_some()
    }
}
