// # HTTP Address-Echo Source
//
// This crate provides the observed-address source for the reconciler.
//
// ## Architecture
//
// Fetches the caller's public address from an external echo service
// (e.g. api.ipify.org) that answers with the address as plain text.
// One GET per reconciliation pass, bounded by a request timeout.
//
// An unreachable or erroring service is a network failure. A body that
// does not parse as an address is unusable input, reported as
// `Indeterminate` so operators can tell the two apart.

use driftdns_core::config::AddressSourceConfig;
use driftdns_core::traits::{AddressSource, AddressSourceFactory};
use driftdns_core::{ComponentRegistry, Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Default request timeout for the echo fetch
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default address-echo service (plain-text response, no rate limit
/// documented for this volume)
pub const DEFAULT_ECHO_URL: &str = "https://api.ipify.org";

/// HTTP-based observed-address source
pub struct HttpAddressSource {
    /// Echo endpoint to fetch the address from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpAddressSource {
    /// Create a new echo source with the default timeout
    ///
    /// # Parameters
    ///
    /// - `url`: echo endpoint (e.g. "https://api.ipify.org")
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl AddressSource for HttpAddressSource {
    async fn observe(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("address echo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "address echo answered {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read address echo response: {}", e)))?;

        // Canonicalize: trim, then parse into IpAddr
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::indeterminate("address echo answered with an empty body"));
        }

        let address: IpAddr = body.parse().map_err(|_| {
            Error::indeterminate(format!(
                "address echo answered with a non-address payload: {:?}",
                body
            ))
        })?;

        tracing::debug!("observed address from {}: {}", self.url, address);
        Ok(address)
    }
}

/// Factory for creating HTTP address sources
pub struct HttpFactory;

impl AddressSourceFactory for HttpFactory {
    fn create(&self, config: &AddressSourceConfig) -> Result<Box<dyn AddressSource>> {
        match config {
            AddressSourceConfig::Http { url, timeout_secs } => Ok(Box::new(
                HttpAddressSource::with_timeout(url.clone(), Duration::from_secs(*timeout_secs)),
            )),
            _ => Err(Error::config("invalid config for HTTP address source")),
        }
    }
}

/// Register the HTTP address source with a registry
pub fn register(registry: &ComponentRegistry) {
    registry.register_address_source("http", Box::new(HttpFactory));
}
