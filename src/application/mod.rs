//! Application layer services implementing business logic.
//!
//! Services consume the domain traits (repository, resolver) and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - URL validation, id allocation and resolution

pub mod services;
