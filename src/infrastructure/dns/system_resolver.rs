//! Hostname resolution through the operating system resolver.

use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::domain::resolver::{HostResolver, ResolveError};

/// Default lookup timeout.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolves hostnames with [`tokio::net::lookup_host`], bounded by a timeout.
///
/// `lookup_host` runs `getaddrinfo` on tokio's blocking pool, so a slow
/// resolver never stalls the request workers. An elapsed timeout counts as
/// a failed lookup.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_TIMEOUT)
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        let lookup = tokio::net::lookup_host((host, 0));
        let count = bounded_lookup(host, self.timeout, async move {
            lookup.await.map(|addrs| addrs.count())
        })
        .await?;

        debug!(host, addresses = count, "Host resolved");
        Ok(())
    }
}

/// Awaits a lookup yielding an address count, mapping every failure mode.
async fn bounded_lookup<F>(host: &str, timeout: Duration, lookup: F) -> Result<usize, ResolveError>
where
    F: Future<Output = io::Result<usize>>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Err(_) => Err(ResolveError::Timeout(host.to_string())),
        Ok(Err(e)) => Err(ResolveError::Lookup {
            host: host.to_string(),
            reason: e.to_string(),
        }),
        Ok(Ok(0)) => Err(ResolveError::NoAddresses(host.to_string())),
        Ok(Ok(count)) => Ok(count),
    }
}

/// Accepts every host without a lookup.
///
/// Used when reachability checks are disabled (`VERIFY_HOSTS=false`).
#[derive(Debug, Clone, Default)]
pub struct PermissiveResolver;

#[async_trait]
impl HostResolver for PermissiveResolver {
    async fn resolve(&self, _host: &str) -> Result<(), ResolveError> {
        Ok(())
    }
}
