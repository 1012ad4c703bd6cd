//! Core traits for the reconciler
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`AddressSource`]: Observe the caller's public address
//! - [`RecordSource`]: Snapshot the published record via a pinned resolver
//! - [`DnsProvider`]: Zone lookup and record upserts via provider APIs

pub mod address_source;
pub mod dns_provider;
pub mod record_source;

pub use address_source::{AddressSource, AddressSourceFactory};
pub use dns_provider::{
    DnsProvider, DnsProviderFactory, ReconciliationRequest, RecordType, ZoneHandle,
};
pub use record_source::{RecordSource, RecordSourceFactory};
