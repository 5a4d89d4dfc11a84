//! Amenity domain types
//!
//! Points of interest returned by the places lookup and stored in the cache.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// == Category ==
/// Kind of point of interest a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hospital,
    School,
    Restaurant,
    ShoppingMall,
    Bank,
    GasStation,
    Pharmacy,
    Gym,
    Park,
    BusStation,
    TrainStation,
    Airport,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 12] = [
        Category::Hospital,
        Category::School,
        Category::Restaurant,
        Category::ShoppingMall,
        Category::Bank,
        Category::GasStation,
        Category::Pharmacy,
        Category::Gym,
        Category::Park,
        Category::BusStation,
        Category::TrainStation,
        Category::Airport,
    ];

    /// Categories looked up when the caller does not name any.
    pub const DEFAULTS: [Category; 5] = [
        Category::Hospital,
        Category::School,
        Category::Restaurant,
        Category::ShoppingMall,
        Category::Bank,
    ];

    /// Wire name, also used inside cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hospital => "hospital",
            Category::School => "school",
            Category::Restaurant => "restaurant",
            Category::ShoppingMall => "shopping_mall",
            Category::Bank => "bank",
            Category::GasStation => "gas_station",
            Category::Pharmacy => "pharmacy",
            Category::Gym => "gym",
            Category::Park => "park",
            Category::BusStation => "bus_station",
            Category::TrainStation => "train_station",
            Category::Airport => "airport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown amenity category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}

// == Coordinates ==
/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns a point shifted by the given degree offsets.
    pub fn offset(&self, dlat: f64, dlng: f64) -> Self {
        Self::new(self.lat + dlat, self.lng + dlng)
    }
}

// == Point Of Interest ==
/// A single nearby place, as ranked by the places lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    #[serde(rename = "type")]
    pub category: Category,
    pub name: String,
    pub address: String,
    /// Travel distance in meters
    pub distance: u32,
    /// Travel duration in seconds
    pub duration: u32,
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    pub coordinates: Coordinates,
}

/// Maximum number of places kept per category.
pub const MAX_PLACES_PER_CATEGORY: usize = 10;

/// Sorts places ascending by distance and keeps the closest
/// [`MAX_PLACES_PER_CATEGORY`].
pub fn rank_by_distance(mut places: Vec<PointOfInterest>) -> Vec<PointOfInterest> {
    places.sort_by_key(|p| p.distance);
    places.truncate(MAX_PLACES_PER_CATEGORY);
    places
}
