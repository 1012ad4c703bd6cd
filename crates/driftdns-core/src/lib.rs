// # driftdns-core
//
// Core library for the driftdns reconciler.
//
// ## Architecture Overview
//
// This library provides the core functionality for DNS drift reconciliation:
// - **AddressSource**: Trait for observing the caller's public address
// - **RecordSource**: Trait for snapshotting the published record via a pinned resolver
// - **DnsProvider**: Trait for zone lookup and record upserts via provider APIs
// - **Reconciler**: One drift-detection pass, from an implicit start state to a terminal `Outcome`
// - **ComponentRegistry**: Plugin-based registry used by the binary to build components
//
// ## Design Principles
//
// 1. **Library-First**: All reconciliation logic lives here, not in the binary
// 2. **Stateless**: Every pass starts fresh; no retry state, no history, no
//    idempotency key between runs
// 3. **Fail-Fast**: The first hard failure aborts the pass; the external
//    scheduler (timer, cron) simply tries again next interval

pub mod config;
pub mod error;
pub mod outcome;
pub mod reconciler;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::{
    AddressSourceConfig, DriftConfig, ProviderConfig, ReconcilerConfig, RecordSourceConfig,
};
pub use error::{Error, Result};
pub use outcome::Outcome;
pub use reconciler::Reconciler;
pub use registry::ComponentRegistry;
pub use traits::{
    AddressSource, DnsProvider, ReconciliationRequest, RecordSource, RecordType, ZoneHandle,
};
