//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Redirect caching (Redis and no-op implementations)
//! - [`dns`] - Hostname resolution
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod dns;
pub mod persistence;
