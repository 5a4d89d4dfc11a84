//! Canned places provider used while no geolocation API key is configured.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::PlacesLookup;
use crate::cache::Radius;
use crate::error::LookupError;
use crate::models::{Category, Coordinates, PointOfInterest};

// (name suffix, dlat, dlng, distance m, duration s, rating, reviews)
const TEMPLATES: [(&str, f64, f64, u32, u32, f32, u32); 3] = [
    ("Central", 0.002, -0.001, 2500, 480, 4.5, 89),
    ("Corner", 0.001, 0.001, 800, 180, 4.2, 156),
    ("Plaza", -0.001, 0.002, 1500, 300, 4.0, 203),
];

/// Deterministic [`PlacesLookup`] returning three places per category.
///
/// Places beyond the requested radius are dropped, and the survivors come
/// back unsorted. Counts calls so tests can tell cache hits from fetches.
#[derive(Debug, Default)]
pub struct MockPlaces {
    calls: AtomicUsize,
}

impl MockPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

fn display_name(category: Category) -> &'static str {
    match category {
        Category::Hospital => "Hospital",
        Category::School => "School",
        Category::Restaurant => "Restaurant",
        Category::ShoppingMall => "Shopping Center",
        Category::Bank => "Bank",
        Category::GasStation => "Fuel Station",
        Category::Pharmacy => "Pharmacy",
        Category::Gym => "Fitness Club",
        Category::Park => "Park",
        Category::BusStation => "Bus Stop",
        Category::TrainStation => "Railway Station",
        Category::Airport => "Airport",
    }
}

#[async_trait]
impl PlacesLookup for MockPlaces {
    async fn nearby(
        &self,
        origin: Coordinates,
        category: Category,
        radius: Radius,
    ) -> Result<Vec<PointOfInterest>, LookupError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        debug!("Mock places lookup for {} within {}m", category, radius.meters());

        let places = TEMPLATES
            .iter()
            .enumerate()
            .filter(|(_, t)| t.3 <= radius.meters())
            .map(|(i, &(suffix, dlat, dlng, distance, duration, rating, reviews))| {
                PointOfInterest {
                    category,
                    name: format!("{} {}", suffix, display_name(category)),
                    address: format!("{} Road, near listing", suffix),
                    distance,
                    duration,
                    place_id: format!("mock_{}_{}", category, i + 1),
                    rating: Some(rating),
                    user_ratings_total: Some(reviews),
                    coordinates: origin.offset(dlat, dlng),
                }
            })
            .collect();

        Ok(places)
    }
}
