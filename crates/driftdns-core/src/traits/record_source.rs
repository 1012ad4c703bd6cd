// # Record Source Trait
//
// Defines the interface for snapshotting the currently published value
// of an address record.
//
// ## Implementations
//
// - Pinned-resolver DNS query: `driftdns-record-dns` crate
//
// The snapshot is read-only and never cached across runs. The resolver
// is explicitly pinned by configuration rather than taken from the
// system, so a stale local cache cannot mask drift.

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for published-record sources
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Snapshot the currently published address for a name
    ///
    /// # Parameters
    ///
    /// - `fqdn`: the fully qualified record name (e.g. "home.example.net")
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: the first address in the answer
    /// - `Err(Error::Resolution)`: the query failed or returned no answer
    async fn current(&self, fqdn: &str) -> Result<IpAddr, crate::Error>;
}

/// Helper trait for constructing record sources from configuration
pub trait RecordSourceFactory: Send + Sync {
    /// Create a RecordSource instance from configuration
    fn create(
        &self,
        config: &crate::config::RecordSourceConfig,
    ) -> Result<Box<dyn RecordSource>, crate::Error>;
}
