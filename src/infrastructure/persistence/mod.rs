//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with SQLx bind parameters, so the crate
//! compiles without a live database.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - URL mapping storage and id allocation queries

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
