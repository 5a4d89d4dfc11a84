//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Local sweep: Removes expired entries from the in-process cache tier

mod sweep;

pub use sweep::spawn_sweep_task;
