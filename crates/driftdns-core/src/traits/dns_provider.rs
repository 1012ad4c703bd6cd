// # DNS Provider Trait
//
// Defines the interface for correcting drift via a provider's API.
//
// ## Implementations
//
// - Gandi LiveDNS: `driftdns-provider-gandi` crate
//
// Providers are isolated, stateless, single-shot integrations: one zone
// lookup and at most one upsert per reconciliation pass, full error
// propagation to the reconciler, no retry or backoff of their own. The
// reconciler never mutates the published record directly; it only
// submits a `ReconciliationRequest` and trusts the provider to apply it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Address record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    #[serde(rename = "A")]
    A,
    /// IPv6 address record
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// The record type an address belongs in
    pub fn for_address(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::Aaaa,
        }
    }

    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-specific reference identifying the editable zone for a
/// domain (a URL or an ID, depending on the provider)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneHandle {
    reference: String,
}

impl ZoneHandle {
    /// Wrap a provider-specific zone reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The raw reference
    pub fn as_str(&self) -> &str {
        &self.reference
    }
}

/// The desired update submitted when drift is detected
///
/// Constructed fresh each run and discarded after use; nothing is
/// persisted between passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationRequest {
    /// Record label within the zone
    pub name: String,
    /// Record type, derived from the address
    pub record_type: RecordType,
    /// TTL in seconds
    pub ttl: u32,
    /// The observed address the record should carry
    pub address: IpAddr,
}

impl ReconciliationRequest {
    /// Build a request for an observed address
    pub fn new(name: impl Into<String>, ttl: u32, address: IpAddr) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::for_address(address),
            ttl,
            address,
        }
    }
}

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Look up the zone handle for a domain
    ///
    /// # Returns
    ///
    /// - `Ok(ZoneHandle)`: the editable zone reference
    /// - `Err(Error::ZoneLookup)`: the API was unreachable or errored
    /// - `Err(Error::Indeterminate)`: the response was missing the handle
    async fn lookup_zone(&self, domain: &str) -> Result<ZoneHandle, crate::Error>;

    /// Submit a PUT-style upsert setting the record to the requested value
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the provider accepted the write
    /// - `Err(Error::UpdateRejected)`: transport failure or non-success status
    async fn upsert_record(
        &self,
        zone: &ZoneHandle,
        request: &ReconciliationRequest,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_follows_address_family() {
        assert_eq!(
            RecordType::for_address("203.0.113.9".parse().unwrap()),
            RecordType::A
        );
        assert_eq!(
            RecordType::for_address("2001:db8::1".parse().unwrap()),
            RecordType::Aaaa
        );
    }

    #[test]
    fn request_derives_its_record_type() {
        let request = ReconciliationRequest::new("home", 1200, "2001:db8::1".parse().unwrap());
        assert_eq!(request.record_type, RecordType::Aaaa);
        assert_eq!(request.ttl, 1200);
    }
}
