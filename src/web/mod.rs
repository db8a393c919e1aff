//! Browser-facing pages.
//!
//! Uses Askama templates for server-side rendering and serves the static
//! assets they reference.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page and asset route configuration

pub mod handlers;
pub mod routes;
