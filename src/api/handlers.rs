//! API Handlers
//!
//! HTTP request handlers for the amenity and cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{AmenityCache, SubjectId};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::listings::{Listing, ListingDirectory};
use crate::models::{
    AmenityQuery, HealthResponse, LocationRequest, MessageResponse, NearbyAmenities,
    StatsResponse,
};
use crate::places::PlacesLookup;
use crate::service::AmenityService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: AmenityService,
    /// Radius used when a request names none
    pub default_radius: u32,
}

impl AppState {
    /// Creates a new AppState around an already-built service.
    pub fn new(service: AmenityService, default_radius: u32) -> Self {
        Self {
            service,
            default_radius,
        }
    }

    /// Wires the service from its parts using configured defaults.
    pub fn from_parts(
        config: &Config,
        cache: Arc<AmenityCache>,
        places: Arc<dyn PlacesLookup>,
        listings: Arc<ListingDirectory>,
    ) -> Self {
        Self::new(
            AmenityService::new(cache, places, listings),
            config.default_radius,
        )
    }

    pub fn cache(&self) -> &Arc<AmenityCache> {
        self.service.cache()
    }
}

/// Handler for GET /properties/:id/nearby-amenities
pub async fn nearby_amenities_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AmenityQuery>,
) -> Result<Json<NearbyAmenities>> {
    let categories = query.categories()?;
    let radius = query.radius_or(state.default_radius)?;

    let result = state
        .service
        .nearby_amenities(&id, &categories, radius)
        .await?;

    Ok(Json(result))
}

/// Handler for GET /properties/:id
pub async fn get_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Listing>> {
    let listing = state.service.listing(&id).await?;
    Ok(Json(listing))
}

/// Handler for PUT /properties/:id/location
pub async fn update_location_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<Listing>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let listing = state
        .service
        .update_location(&id, req.coordinates())
        .await?;

    Ok(Json(listing))
}

/// Handler for DELETE /properties/:id
pub async fn delete_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.service.delete_listing(&id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Listing '{}' deleted successfully",
        id
    ))))
}

/// Handler for DELETE /cache/:id
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let subject = SubjectId::new(id)?;
    state.cache().invalidate(&subject).await;

    Ok(Json(MessageResponse::new(format!(
        "Cached amenities for '{}' invalidated",
        subject
    ))))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache().clear().await;
    Json(MessageResponse::new("Amenity cache cleared"))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache().stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
