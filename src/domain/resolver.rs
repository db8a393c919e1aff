//! Hostname reachability contract.

use async_trait::async_trait;
use thiserror::Error;

/// Reasons a hostname failed to resolve.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("lookup for {0} timed out")]
    Timeout(String),

    #[error("lookup for {host} failed: {reason}")]
    Lookup { host: String, reason: String },

    #[error("{0} resolved to no addresses")]
    NoAddresses(String),
}

/// Confirms that a hostname resolves before a URL is accepted.
///
/// This is a best-effort existence check at submission time. A host that
/// resolves now may stop resolving later.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::SystemResolver`] - OS resolver with a timeout
/// - [`crate::infrastructure::dns::PermissiveResolver`] - accepts every host
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolves `host` (a domain name without port or brackets).
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the name does not resolve in time.
    async fn resolve(&self, host: &str) -> Result<(), ResolveError>;
}
