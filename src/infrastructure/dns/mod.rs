//! Hostname reachability checks.
//!
//! - [`SystemResolver`] - OS resolver bounded by a timeout
//! - [`PermissiveResolver`] - No-op used when checks are disabled

mod system_resolver;

pub use system_resolver::{DEFAULT_LOOKUP_TIMEOUT, PermissiveResolver, SystemResolver};
