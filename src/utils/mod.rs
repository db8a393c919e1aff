//! Helper functions shared across layers.
//!
//! - [`url_validator`] - Syntactic URL validation and host extraction
//! - [`db_error`] - Mapping of database errors to repository errors

pub mod db_error;
pub mod url_validator;
