//! Request DTOs for the amenity API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::cache::Radius;
use crate::error::KeyError;
use crate::models::{Category, Coordinates, UnknownCategory};

/// Query string for `GET /properties/{id}/nearby-amenities`
///
/// # Fields
/// - `types`: Comma-separated category names (defaults to hospital, school, restaurant)
/// - `radius`: Search radius in meters (defaults to the configured radius)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityQuery {
    #[serde(default)]
    pub types: Option<String>,
    #[serde(default)]
    pub radius: Option<u32>,
}

impl AmenityQuery {
    /// Parses `types`, dropping duplicates but keeping request order.
    pub fn categories(&self) -> Result<Vec<Category>, UnknownCategory> {
        let raw = match self.types.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Category::DEFAULTS.to_vec()),
        };

        let mut categories = Vec::new();
        for name in raw.split(',').filter(|s| !s.trim().is_empty()) {
            let category = name.parse::<Category>()?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(categories)
    }

    /// The requested radius, or `default_meters` when absent.
    pub fn radius_or(&self, default_meters: u32) -> Result<Radius, KeyError> {
        Radius::new(self.radius.unwrap_or(default_meters))
    }
}

/// Request body for `PUT /properties/{id}/location`
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

impl LocationRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Some("Latitude must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Some("Longitude must be between -180 and 180".to_string());
        }
        None
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let query = AmenityQuery::default();
        assert_eq!(
            query.categories().unwrap(),
            vec![
                Category::Hospital,
                Category::School,
                Category::Restaurant,
                Category::ShoppingMall,
                Category::Bank,
            ]
        );
    }

    #[test]
    fn test_categories_parsed_and_deduplicated() {
        let query = AmenityQuery {
            types: Some("park, gym,park".to_string()),
            radius: None,
        };
        assert_eq!(query.categories().unwrap(), vec![Category::Park, Category::Gym]);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let query = AmenityQuery {
            types: Some("park,zoo".to_string()),
            radius: None,
        };
        assert!(query.categories().is_err());
    }

    #[test]
    fn test_radius_default_and_zero() {
        let mut query = AmenityQuery::default();
        assert_eq!(query.radius_or(5000).unwrap().meters(), 5000);

        query.radius = Some(0);
        assert!(query.radius_or(5000).is_err());
    }

    #[test]
    fn test_location_validation() {
        assert!(LocationRequest { lat: 19.0, lng: 72.8 }.validate().is_none());
        assert!(LocationRequest { lat: 91.0, lng: 0.0 }.validate().is_some());
        assert!(LocationRequest { lat: 0.0, lng: -181.0 }.validate().is_some());
    }
}
