//! Business logic services for the application layer.

pub mod shortener_service;

pub use shortener_service::{DEFAULT_ALLOCATION_ATTEMPTS, ShortenerService, parse_short_id};
