// # Address Source Trait
//
// Defines the interface for observing the caller's current public address.
//
// ## Implementations
//
// - HTTP address-echo: `driftdns-ip-http` crate
//
// Address sources are observers, not decision-makers: they report what
// they see and never decide whether an update is needed. One observation
// per reconciliation pass; no retries, no caching across calls.

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for observed-address sources
///
/// Implementations must canonicalize the payload before returning it:
/// trim surrounding whitespace and parse into [`IpAddr`], so comparison
/// downstream is structural and formatting differences cannot produce
/// false drift.
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// Observe the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: the canonicalized observed address
    /// - `Err(Error::Network)`: the service was unreachable or errored
    /// - `Err(Error::Indeterminate)`: the payload was empty or not an address
    async fn observe(&self) -> Result<IpAddr, crate::Error>;
}

/// Helper trait for constructing address sources from configuration
pub trait AddressSourceFactory: Send + Sync {
    /// Create an AddressSource instance from configuration
    fn create(
        &self,
        config: &crate::config::AddressSourceConfig,
    ) -> Result<Box<dyn AddressSource>, crate::Error>;
}
