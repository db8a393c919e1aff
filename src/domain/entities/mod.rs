//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored short id → original URL mapping
//! - [`NewUrlMapping`] - Insert payload for a mapping that does not exist yet

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
