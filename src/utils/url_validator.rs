//! Syntactic validation of URLs submitted for shortening.
//!
//! Only absolute `http`/`https` URLs with a hostname are accepted. The raw
//! input must also spell out `scheme://`, so strings such as
//! `http:example.com` that a WHATWG parser would quietly repair are rejected.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;
use url::{Host, Url};

/// Compiled regex for the `http(s)://` prefix check.
static HTTP_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://.+").unwrap());

/// Errors that can occur during URL validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no hostname")]
    MissingHost,
}

/// Host part of a validated URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetHost {
    /// A DNS name that still has to be resolved.
    Domain(String),
    /// An IP literal; nothing to resolve.
    Ip(IpAddr),
}

/// Validates `input` and extracts its host.
///
/// # Rules
///
/// 1. Non-empty
/// 2. Parses as an absolute URL
/// 3. Scheme is `http` or `https` (any case)
/// 4. Raw input starts with `http://` or `https://` (any case)
/// 5. Has a non-empty hostname
///
/// # Errors
///
/// Returns the first violated rule as a [`UrlValidationError`].
///
/// # Examples
///
/// ```
/// use shorturl::utils::url_validator::{TargetHost, validate_url};
///
/// assert_eq!(
///     validate_url("HTTPS://www.example.com/path").unwrap(),
///     TargetHost::Domain("www.example.com".to_string())
/// );
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<TargetHost, UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if !HTTP_URL_PREFIX.is_match(input) {
        return Err(UrlValidationError::InvalidFormat(
            "expected scheme://host".to_string(),
        ));
    }

    match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => {
            Ok(TargetHost::Domain(domain.to_string()))
        }
        Some(Host::Ipv4(ip)) => Ok(TargetHost::Ip(IpAddr::V4(ip))),
        Some(Host::Ipv6(ip)) => Ok(TargetHost::Ip(IpAddr::V6(ip))),
        _ => Err(UrlValidationError::MissingHost),
    }
}
