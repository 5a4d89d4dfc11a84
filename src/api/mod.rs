//! API Module
//!
//! HTTP handlers and routing for the amenity service REST API.
//!
//! # Endpoints
//! - `GET /properties/:id/nearby-amenities` - Cached amenity lookup
//! - `PUT /properties/:id/location` - Move a listing
//! - `DELETE /properties/:id` - Delete a listing
//! - `GET /cache/stats`, `DELETE /cache`, `DELETE /cache/:id` - Cache admin
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
