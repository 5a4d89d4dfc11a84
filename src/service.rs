//! Amenity Service
//!
//! Read-through consumer of the amenity cache: cache first, places lookup on
//! a miss, and invalidation after any listing change.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{error, info};

use crate::cache::{AmenityCache, Radius, SubjectId};
use crate::error::{AppError, Result};
use crate::listings::{Listing, ListingDirectory};
use crate::models::{
    rank_by_distance, Category, Coordinates, ListingSummary, NearbyAmenities, PointOfInterest,
};
use crate::places::PlacesLookup;

/// Ties listings, the places lookup and the cache together.
#[derive(Clone)]
pub struct AmenityService {
    cache: Arc<AmenityCache>,
    places: Arc<dyn PlacesLookup>,
    listings: Arc<ListingDirectory>,
}

impl AmenityService {
    pub fn new(
        cache: Arc<AmenityCache>,
        places: Arc<dyn PlacesLookup>,
        listings: Arc<ListingDirectory>,
    ) -> Self {
        Self {
            cache,
            places,
            listings,
        }
    }

    pub fn cache(&self) -> &Arc<AmenityCache> {
        &self.cache
    }

    // == Nearby Amenities ==
    /// Returns ranked nearby places for each requested category.
    ///
    /// A failed lookup for one category yields an empty list for it; the
    /// other categories are still served.
    pub async fn nearby_amenities(
        &self,
        listing_id: &str,
        categories: &[Category],
        radius: Radius,
    ) -> Result<NearbyAmenities> {
        let subject = SubjectId::new(listing_id)?;
        let listing = self.require_listing(listing_id).await?;
        let origin = listing.coordinates.ok_or_else(|| {
            AppError::InvalidRequest(format!("Listing {} has no coordinates", listing_id))
        })?;

        let mut amenities = BTreeMap::new();
        for &category in categories {
            let places = self.places_for(&subject, origin, category, radius).await;
            amenities.insert(category, places);
        }

        Ok(NearbyAmenities {
            property: ListingSummary {
                id: listing.id,
                title: listing.title,
                coordinates: origin,
            },
            amenities,
            search_radius: radius.meters(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn places_for(
        &self,
        subject: &SubjectId,
        origin: Coordinates,
        category: Category,
        radius: Radius,
    ) -> Vec<PointOfInterest> {
        if let Some(cached) = self.cache.get(subject, category, radius).await {
            return cached;
        }

        match self.places.nearby(origin, category, radius).await {
            Ok(places) => {
                let ranked = rank_by_distance(places);
                self.cache
                    .set(subject, category, ranked.clone(), None, radius)
                    .await;
                ranked
            }
            Err(e) => {
                error!("Error fetching {} amenities for {}: {}", category, subject, e);
                Vec::new()
            }
        }
    }

    // == Update Location ==
    /// Moves a listing and drops its cached amenities.
    pub async fn update_location(&self, listing_id: &str, coordinates: Coordinates) -> Result<Listing> {
        let subject = SubjectId::new(listing_id)?;
        let listing = self
            .listings
            .update_location(listing_id, coordinates)
            .await
            .ok_or_else(|| not_found(listing_id))?;

        self.cache.invalidate(&subject).await;
        info!("Listing {} moved, amenity cache invalidated", listing_id);
        Ok(listing)
    }

    // == Delete Listing ==
    /// Deletes a listing and drops its cached amenities.
    pub async fn delete_listing(&self, listing_id: &str) -> Result<()> {
        let subject = SubjectId::new(listing_id)?;
        if !self.listings.remove(listing_id).await {
            return Err(not_found(listing_id));
        }

        self.cache.invalidate(&subject).await;
        info!("Listing {} deleted, amenity cache invalidated", listing_id);
        Ok(())
    }

    /// Looks a listing up by id.
    pub async fn listing(&self, listing_id: &str) -> Result<Listing> {
        self.require_listing(listing_id).await
    }

    async fn require_listing(&self, listing_id: &str) -> Result<Listing> {
        self.listings
            .get(listing_id)
            .await
            .ok_or_else(|| not_found(listing_id))
    }
}

fn not_found(listing_id: &str) -> AppError {
    AppError::NotFound(format!("Listing {} not found", listing_id))
}
