//! HTTP client helper with native-tls support.
//!
//! This module provides a configured HTTP agent that uses native-tls
//! for TLS connections, plus URL validation applied before any request.

use crate::error::CatalogError;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Global timeout for all HTTP operations (30 seconds).
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("fontpair/", env!("CARGO_PKG_VERSION"));

/// Validate that a URL is acceptable for a network request.
///
/// Enforces an `http` or `https` scheme and a non-empty host.
pub fn validate_remote_url(url: &str) -> Result<(), CatalogError> {
    let parsed = url::Url::parse(url).map_err(|e| CatalogError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(CatalogError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{scheme}'"),
            });
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(CatalogError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(())
}

/// Create a new HTTP agent configured with native-tls and a global timeout.
///
/// Uses the platform verifier so the system's root certificates apply.
pub fn agent() -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(HTTP_TIMEOUT))
        .build()
        .into()
}

/// GET `url` and return the body, limited to `limit` bytes.
///
/// # Errors
///
/// Returns an error if the URL fails validation, the request fails
/// (DNS, connection, TLS, or non-2xx response), or the body cannot be read.
pub fn get_bytes(agent: &Agent, url: &str, limit: u64) -> Result<Vec<u8>, CatalogError> {
    validate_remote_url(url)?;

    agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|source| CatalogError::Http {
            url: url.to_string(),
            source,
        })?
        .into_body()
        .with_config()
        .limit(limit)
        .read_to_vec()
        .map_err(|source| match source {
            ureq::Error::BodyExceedsLimit(_) => CatalogError::TooLarge {
                source_name: url.to_string(),
                limit,
            },
            source => CatalogError::Http {
                url: url.to_string(),
                source,
            },
        })
}
