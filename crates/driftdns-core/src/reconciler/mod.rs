//! The drift reconciliation pass
//!
//! The Reconciler is responsible for:
//! - Observing the public address via AddressSource
//! - Snapshotting the published record via RecordSource
//! - Correcting drift via DnsProvider
//!
//! ## Pass Flow
//!
//! ```text
//! ┌───────────────┐             ┌──────────────┐
//! │ AddressSource │──observe()─▶│  Reconciler  │
//! └───────────────┘             └──────────────┘
//!                                       │
//!          ┌────────────────────────────┼─────────────────────────┐
//!          ▼                            ▼                         ▼
//! ┌──────────────┐              ┌──────────────┐          ┌──────────────┐
//! │ RecordSource │              │   compare    │          │ DnsProvider  │
//! │ (current)    │              │ (structural) │          │ (lookup+put) │
//! └──────────────┘              └──────────────┘          └──────────────┘
//! ```
//!
//! One pass performs at most three sequential network operations plus
//! the conditional upsert, then lands in a terminal [`Outcome`]. The
//! ordering is load-bearing: an unreachable address echo aborts before
//! any DNS query or provider call is attempted.

use crate::config::ReconcilerConfig;
use crate::error::{Error, Result};
use crate::outcome::Outcome;
use crate::traits::{AddressSource, DnsProvider, ReconciliationRequest, RecordSource};
use tracing::{debug, info, warn};

/// Single-pass drift reconciler
///
/// Stateless by construction: the struct owns its seams and
/// configuration, nothing else. Run it once per invocation and let the
/// external scheduler provide the cadence.
pub struct Reconciler {
    /// Observed-address source
    address_source: Box<dyn AddressSource>,

    /// Published-record source
    record_source: Box<dyn RecordSource>,

    /// DNS provider for corrections
    provider: Box<dyn DnsProvider>,

    /// The record under reconciliation
    config: ReconcilerConfig,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// # Parameters
    ///
    /// - `address_source`: observed-address source implementation
    /// - `record_source`: published-record source implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: the record to reconcile
    pub fn new(
        address_source: Box<dyn AddressSource>,
        record_source: Box<dyn RecordSource>,
        provider: Box<dyn DnsProvider>,
        config: ReconcilerConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            address_source,
            record_source,
            provider,
            config,
        })
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(Outcome)`: the pass reached a terminal state
    /// - `Err(Error)`: a step failed hard (`Network`, `Resolution`,
    ///   `ZoneLookup`); nothing was written
    ///
    /// Unusable inputs (empty or malformed payloads) land in
    /// `Outcome::Indeterminate` rather than an error, so callers can log
    /// them distinctly from rejected writes.
    pub async fn run(&self) -> Result<Outcome> {
        let fqdn = self.config.fqdn();

        let observed = match self.address_source.observe().await {
            Ok(address) => address,
            Err(Error::Indeterminate(reason)) => {
                warn!("observed address unusable: {}", reason);
                return Ok(Outcome::Indeterminate { reason });
            }
            Err(e) => return Err(e),
        };
        debug!("observed address: {}", observed);

        let current = self.record_source.current(&fqdn).await?;
        debug!("published record for {}: {}", fqdn, current);

        if observed == current {
            info!("{} already points at {}", fqdn, observed);
            return Ok(Outcome::NoChange { address: observed });
        }

        info!("drift detected for {}: {} -> {}", fqdn, current, observed);

        let zone = match self.provider.lookup_zone(&self.config.domain).await {
            Ok(zone) => zone,
            Err(Error::Indeterminate(reason)) => {
                warn!("zone lookup unusable: {}", reason);
                return Ok(Outcome::Indeterminate { reason });
            }
            Err(e) => return Err(e),
        };

        let request =
            ReconciliationRequest::new(self.config.record.clone(), self.config.ttl, observed);

        match self.provider.upsert_record(&zone, &request).await {
            Ok(()) => {
                info!("updated {} to {} (was {})", fqdn, observed, current);
                Ok(Outcome::Updated {
                    previous: current,
                    address: observed,
                })
            }
            Err(e) => {
                warn!(
                    "provider {} did not apply the update: {}",
                    self.provider.provider_name(),
                    e
                );
                Ok(Outcome::UpdateFailed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
