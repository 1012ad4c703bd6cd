//! Contract: fail-fast ordering
//!
//! Every pass performs its network operations in a fixed order
//! (address echo, record resolution, zone lookup, upsert) and the first
//! hard failure aborts the run before the next operation is attempted.
//! No partial application: either the full pass completes or no write
//! is attempted.

mod common;

use common::{
    AddressReply, RecordReply, ScriptedAddressSource, ScriptedProvider, ScriptedRecordSource,
    UpsertReply, ZoneReply,
};
use driftdns_core::config::ReconcilerConfig;
use driftdns_core::{Error, Outcome, Reconciler};
use std::net::IpAddr;

fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[tokio::test]
async fn unreachable_echo_skips_resolution_and_provider() {
    let address_source =
        ScriptedAddressSource::new(AddressReply::Unreachable("echo unreachable"));
    let record_source = ScriptedRecordSource::new(RecordReply::Address(addr("203.0.113.5")));
    let record_probe = record_source.probe();
    let provider = ScriptedProvider::new(ZoneReply::Handle("zone"), UpsertReply::Accept);
    let provider_probe = provider.probe();

    let reconciler = Reconciler::new(
        Box::new(address_source),
        Box::new(record_source),
        Box::new(provider),
        ReconcilerConfig::new("example.net", "home"),
    )
    .unwrap();

    let result = reconciler.run().await;

    assert!(matches!(result, Err(Error::Network(_))));
    assert_eq!(record_probe.current_count(), 0);
    assert_eq!(provider_probe.lookup_count(), 0);
    assert_eq!(provider_probe.upsert_count(), 0);
}

#[tokio::test]
async fn unusable_echo_payload_is_indeterminate_before_any_resolution() {
    let address_source =
        ScriptedAddressSource::new(AddressReply::Unusable("echo answered with an empty body"));
    let record_source = ScriptedRecordSource::new(RecordReply::Address(addr("203.0.113.5")));
    let record_probe = record_source.probe();
    let provider = ScriptedProvider::new(ZoneReply::Handle("zone"), UpsertReply::Accept);
    let provider_probe = provider.probe();

    let reconciler = Reconciler::new(
        Box::new(address_source),
        Box::new(record_source),
        Box::new(provider),
        ReconcilerConfig::new("example.net", "home"),
    )
    .unwrap();

    let outcome = reconciler.run().await.unwrap();

    assert!(matches!(outcome, Outcome::Indeterminate { .. }));
    assert_eq!(record_probe.current_count(), 0);
    assert_eq!(provider_probe.lookup_count(), 0);
}

#[tokio::test]
async fn failed_resolution_skips_the_provider() {
    let address_source = ScriptedAddressSource::new(AddressReply::Address(addr("203.0.113.9")));
    let record_source = ScriptedRecordSource::new(RecordReply::NoAnswer("no answer"));
    let provider = ScriptedProvider::new(ZoneReply::Handle("zone"), UpsertReply::Accept);
    let provider_probe = provider.probe();

    let reconciler = Reconciler::new(
        Box::new(address_source),
        Box::new(record_source),
        Box::new(provider),
        ReconcilerConfig::new("example.net", "home"),
    )
    .unwrap();

    let result = reconciler.run().await;

    assert!(matches!(result, Err(Error::Resolution(_))));
    assert_eq!(provider_probe.lookup_count(), 0);
    assert_eq!(provider_probe.upsert_count(), 0);
}

#[tokio::test]
async fn unreachable_zone_lookup_aborts_without_an_upsert() {
    let address_source = ScriptedAddressSource::new(AddressReply::Address(addr("203.0.113.9")));
    let record_source = ScriptedRecordSource::new(RecordReply::Address(addr("203.0.113.5")));
    let provider = ScriptedProvider::new(
        ZoneReply::Unreachable("provider API unreachable"),
        UpsertReply::Accept,
    );
    let provider_probe = provider.probe();

    let reconciler = Reconciler::new(
        Box::new(address_source),
        Box::new(record_source),
        Box::new(provider),
        ReconcilerConfig::new("example.net", "home"),
    )
    .unwrap();

    let result = reconciler.run().await;

    assert!(matches!(result, Err(Error::ZoneLookup(_))));
    assert_eq!(provider_probe.upsert_count(), 0);
}

#[tokio::test]
async fn each_pass_observes_exactly_once() {
    let address_source = ScriptedAddressSource::new(AddressReply::Address(addr("203.0.113.5")));
    let address_probe = address_source.probe();
    let record_source = ScriptedRecordSource::new(RecordReply::Address(addr("203.0.113.5")));
    let provider = ScriptedProvider::new(ZoneReply::Handle("zone"), UpsertReply::Accept);

    let reconciler = Reconciler::new(
        Box::new(address_source),
        Box::new(record_source),
        Box::new(provider),
        ReconcilerConfig::new("example.net", "home"),
    )
    .unwrap();

    reconciler.run().await.unwrap();

    assert_eq!(address_probe.observe_count(), 1);
}
