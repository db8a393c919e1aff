//! Data Transfer Objects for API requests and responses.
//!
//! DTOs use Serde for serialization and validator for input validation.

pub mod health;
pub mod shorten;
