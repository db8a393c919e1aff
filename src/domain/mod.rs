//! Domain layer containing business entities and collaborator contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Persistence trait definitions
//! - [`resolver`] - Hostname reachability trait
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod resolver;
