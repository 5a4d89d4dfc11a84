//! Amenity Cache - nearby-amenity lookups behind a two-tier cache
//!
//! An in-process TTL cache backed by an optional shared Redis tier, with
//! graceful degradation to local-only when Redis is unreachable.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod listings;
pub mod models;
pub mod places;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use cache::AmenityCache;
pub use config::Config;
pub use service::AmenityService;
pub use tasks::spawn_sweep_task;
