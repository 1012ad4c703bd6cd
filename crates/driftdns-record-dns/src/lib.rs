// # Pinned-Resolver Record Source
//
// This crate provides the published-record source for the reconciler.
//
// ## Architecture
//
// One address-record query per reconciliation pass, issued against an
// explicitly pinned resolver rather than the system default (a stale
// local cache would mask drift). Single attempt, bounded timeout; no
// answer is a resolution failure.

use driftdns_core::config::RecordSourceConfig;
use driftdns_core::traits::{RecordSource, RecordSourceFactory};
use driftdns_core::{ComponentRegistry, Error, Result};

use hickory_resolver::TokioResolver;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;

use std::net::IpAddr;
use std::time::Duration;

/// Default query timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Record source backed by a resolver pinned to one nameserver
pub struct PinnedRecordSource {
    resolver: TokioResolver,
    nameserver: IpAddr,
}

impl PinnedRecordSource {
    /// Create a source pinned to a nameserver, with the default timeout
    ///
    /// # Parameters
    ///
    /// - `nameserver`: resolver to query (UDP/TCP port 53)
    pub fn new(nameserver: IpAddr) -> Self {
        Self::with_timeout(nameserver, DEFAULT_TIMEOUT)
    }

    /// Create with a custom query timeout
    pub fn with_timeout(nameserver: IpAddr, timeout: Duration) -> Self {
        let nameservers = NameServerConfigGroup::from_ips_clear(&[nameserver], 53, true);
        let config = ResolverConfig::from_parts(None, Vec::new(), nameservers);

        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        builder.options_mut().timeout = timeout;
        // Fail-fast: one attempt, the external scheduler retries next interval
        builder.options_mut().attempts = 1;

        Self {
            resolver: builder.build(),
            nameserver,
        }
    }

    /// The nameserver this source is pinned to
    pub fn nameserver(&self) -> IpAddr {
        self.nameserver
    }
}

#[async_trait::async_trait]
impl RecordSource for PinnedRecordSource {
    async fn current(&self, fqdn: &str) -> Result<IpAddr> {
        let lookup = self.resolver.lookup_ip(fqdn).await.map_err(|e| {
            Error::resolution(format!(
                "query for {} against {} failed: {}",
                fqdn, self.nameserver, e
            ))
        })?;

        let address = lookup.iter().next().ok_or_else(|| {
            Error::resolution(format!("no address record published for {}", fqdn))
        })?;

        tracing::debug!("{} resolves to {} (via {})", fqdn, address, self.nameserver);
        Ok(address)
    }
}

/// Factory for creating pinned record sources
pub struct DnsFactory;

impl RecordSourceFactory for DnsFactory {
    fn create(&self, config: &RecordSourceConfig) -> Result<Box<dyn RecordSource>> {
        match config {
            RecordSourceConfig::Dns {
                resolver,
                timeout_secs,
            } => {
                let nameserver: IpAddr = resolver.parse().map_err(|_| {
                    Error::config(format!("invalid resolver address: {}", resolver))
                })?;

                Ok(Box::new(PinnedRecordSource::with_timeout(
                    nameserver,
                    Duration::from_secs(*timeout_secs),
                )))
            }
            _ => Err(Error::config("invalid config for DNS record source")),
        }
    }
}

/// Register the DNS record source with a registry
pub fn register(registry: &ComponentRegistry) {
    registry.register_record_source("dns", Box::new(DnsFactory));
}
