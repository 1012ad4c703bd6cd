// # Gandi LiveDNS Provider
//
// This crate provides the Gandi LiveDNS implementation of the provider
// seam.
//
// ## API Reference
//
// - LiveDNS v5: https://api.gandi.net/docs/livedns/
// - Zone lookup: GET `/domains/:domain` (authenticated with `X-Api-Key`);
//   the `zone_records_href` field of the response is the zone handle
// - RRset upsert: PUT `{zone_records_href}/:rrset_name/:rrset_type` with
//   body `{"rrset_name", "rrset_type", "rrset_ttl", "rrset_values"}`
//
// ## Behavior
//
// One zone lookup and at most one upsert per reconciliation pass. No
// retry, no backoff, no caching: errors propagate to the reconciler and
// the external scheduler tries again next interval. A response missing
// the zone handle is reported as `Indeterminate`, distinct from a
// rejected write.
//
// ## Security
//
// The API key never appears in logs or Debug output.

use async_trait::async_trait;
use driftdns_core::config::ProviderConfig;
use driftdns_core::traits::{DnsProvider, DnsProviderFactory, ReconciliationRequest, ZoneHandle};
use driftdns_core::{ComponentRegistry, Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Gandi LiveDNS v5 base URL
const GANDI_API_BASE: &str = "https://dns.api.gandi.net/api/v5";

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Subset of the LiveDNS domain object the reconciler needs
#[derive(Debug, Deserialize)]
struct DomainInfo {
    #[serde(default)]
    zone_records_href: Option<String>,
}

/// Gandi LiveDNS provider
pub struct GandiProvider {
    /// LiveDNS API key; never logged
    api_key: String,

    /// API base URL (overridden in tests to point at a mock server)
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for GandiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GandiProvider")
            .field("api_key", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GandiProvider {
    /// Create a new provider against the production API
    ///
    /// # Parameters
    ///
    /// - `api_key`: LiveDNS API key with write access to the zone
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_api_base(api_key, GANDI_API_BASE)
    }

    /// Create a provider against a custom API base URL
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Gandi API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        let api_base = api_base.into();

        Ok(Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl DnsProvider for GandiProvider {
    /// Look up the zone handle for a domain
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /domains/:domain
    /// X-Api-Key: <key>
    /// ```
    async fn lookup_zone(&self, domain: &str) -> Result<ZoneHandle> {
        let url = format!("{}/domains/{}", self.api_base, domain);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::zone_lookup(format!("zone lookup request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());

            return Err(match status.as_u16() {
                401 | 403 => Error::zone_lookup(format!(
                    "authentication failed for {}: invalid API key or insufficient permissions ({})",
                    domain, status
                )),
                404 => Error::zone_lookup(format!("domain {} not found ({})", domain, status)),
                _ => Error::zone_lookup(format!(
                    "zone lookup for {} failed: {} - {}",
                    domain, status, body
                )),
            });
        }

        let info: DomainInfo = response.json().await.map_err(|e| {
            Error::indeterminate(format!("zone lookup answered with an unparsable body: {}", e))
        })?;

        match info.zone_records_href {
            Some(href) if !href.is_empty() => {
                tracing::debug!("zone handle for {}: {}", domain, href);
                Ok(ZoneHandle::new(href))
            }
            _ => Err(Error::indeterminate(format!(
                "zone lookup response for {} is missing zone_records_href",
                domain
            ))),
        }
    }

    /// Submit the RRset upsert
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT {zone_records_href}/:rrset_name/:rrset_type
    /// X-Api-Key: <key>
    ///
    /// {"rrset_name": "...", "rrset_type": "A", "rrset_ttl": 1200, "rrset_values": ["..."]}
    /// ```
    async fn upsert_record(
        &self,
        zone: &ZoneHandle,
        request: &ReconciliationRequest,
    ) -> Result<()> {
        let url = format!(
            "{}/{}/{}",
            zone.as_str().trim_end_matches('/'),
            request.name,
            request.record_type
        );

        let payload = serde_json::json!({
            "rrset_name": request.name,
            "rrset_type": request.record_type.as_str(),
            "rrset_ttl": request.ttl,
            "rrset_values": [request.address.to_string()],
        });

        tracing::debug!(
            "upserting {} record {} -> {} (ttl {})",
            request.record_type,
            request.name,
            request.address,
            request.ttl
        );

        let response = self
            .client
            .put(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::update_rejected(format!("upsert request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());

            return Err(Error::update_rejected(format!(
                "provider answered {} - {}",
                status, body
            )));
        }

        tracing::debug!("provider accepted upsert with {}", status);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "gandi"
    }
}

/// Factory for creating Gandi providers
pub struct GandiFactory;

impl DnsProviderFactory for GandiFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Gandi { api_key, api_base } => {
                let provider = match api_base {
                    Some(base) => GandiProvider::with_api_base(api_key.clone(), base.clone())?,
                    None => GandiProvider::new(api_key.clone())?,
                };
                Ok(Box::new(provider))
            }
            _ => Err(Error::config("invalid config for Gandi provider")),
        }
    }
}

/// Register the Gandi provider with a registry
pub fn register(registry: &ComponentRegistry) {
    registry.register_provider("gandi", Box::new(GandiFactory));
}
