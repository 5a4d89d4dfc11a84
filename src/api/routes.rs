//! API Routes
//!
//! Configures the Axum router with the amenity and cache admin endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_listing_handler, get_listing_handler, health_handler,
    invalidate_handler, nearby_amenities_handler, stats_handler, update_location_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties/:id/nearby-amenities` - Cached amenity lookup
/// - `GET /properties/:id` - Listing record
/// - `PUT /properties/:id/location` - Move a listing (invalidates its cache)
/// - `DELETE /properties/:id` - Delete a listing (invalidates its cache)
/// - `GET /cache/stats` - Cache statistics
/// - `DELETE /cache` - Clear the amenity namespace
/// - `DELETE /cache/:id` - Invalidate one listing
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/properties/:id/nearby-amenities", get(nearby_amenities_handler))
        .route("/properties/:id/location", put(update_location_handler))
        .route(
            "/properties/:id",
            get(get_listing_handler).delete(delete_listing_handler),
        )
        .route("/cache/stats", get(stats_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/:id", delete(invalidate_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
