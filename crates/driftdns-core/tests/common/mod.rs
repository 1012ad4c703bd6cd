//! Test doubles for reconciler contract tests
//!
//! Scripted implementations of the three seams. Each mock hands out a
//! cloneable probe sharing its call counters, so tests keep visibility
//! after the mock is boxed into the reconciler.

use driftdns_core::error::{Error, Result};
use driftdns_core::traits::{
    AddressSource, DnsProvider, ReconciliationRequest, RecordSource, ZoneHandle,
};
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a scripted address source answers with
pub enum AddressReply {
    /// A usable observed address
    Address(IpAddr),
    /// The echo service was unreachable
    Unreachable(&'static str),
    /// The payload was present but unusable
    Unusable(&'static str),
}

/// Counter handle for a [`ScriptedAddressSource`]
#[derive(Clone)]
pub struct AddressProbe {
    calls: Arc<AtomicUsize>,
}

impl AddressProbe {
    /// Number of times observe() was called
    pub fn observe_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// An AddressSource that answers from a script and counts calls
pub struct ScriptedAddressSource {
    reply: AddressReply,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAddressSource {
    pub fn new(reply: AddressReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn probe(&self) -> AddressProbe {
        AddressProbe {
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait::async_trait]
impl AddressSource for ScriptedAddressSource {
    async fn observe(&self) -> Result<IpAddr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            AddressReply::Address(addr) => Ok(*addr),
            AddressReply::Unreachable(msg) => Err(Error::network(*msg)),
            AddressReply::Unusable(msg) => Err(Error::indeterminate(*msg)),
        }
    }
}

/// What a scripted record source answers with
pub enum RecordReply {
    /// The published address
    Address(IpAddr),
    /// No answer from the resolver
    NoAnswer(&'static str),
}

/// Counter handle for a [`ScriptedRecordSource`]
#[derive(Clone)]
pub struct RecordProbe {
    calls: Arc<AtomicUsize>,
    names: Arc<Mutex<Vec<String>>>,
}

impl RecordProbe {
    /// Number of times current() was called
    pub fn current_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Names the reconciler asked to resolve
    pub fn queried_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

/// A RecordSource that answers from a script and records queried names
pub struct ScriptedRecordSource {
    reply: RecordReply,
    calls: Arc<AtomicUsize>,
    names: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRecordSource {
    pub fn new(reply: RecordReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            names: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn probe(&self) -> RecordProbe {
        RecordProbe {
            calls: Arc::clone(&self.calls),
            names: Arc::clone(&self.names),
        }
    }
}

#[async_trait::async_trait]
impl RecordSource for ScriptedRecordSource {
    async fn current(&self, fqdn: &str) -> Result<IpAddr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(fqdn.to_string());
        match &self.reply {
            RecordReply::Address(addr) => Ok(*addr),
            RecordReply::NoAnswer(msg) => Err(Error::resolution(*msg)),
        }
    }
}

/// What a scripted provider answers a zone lookup with
pub enum ZoneReply {
    /// A usable zone handle
    Handle(&'static str),
    /// The response was missing the handle field
    Malformed(&'static str),
    /// The API was unreachable
    Unreachable(&'static str),
}

/// What a scripted provider answers an upsert with
pub enum UpsertReply {
    /// The provider accepted the write
    Accept,
    /// The provider rejected the write
    Reject(&'static str),
}

/// Counter handle for a [`ScriptedProvider`]
#[derive(Clone)]
pub struct ProviderProbe {
    lookups: Arc<AtomicUsize>,
    upserts: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<ReconciliationRequest>>>,
}

impl ProviderProbe {
    /// Number of times lookup_zone() was called
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of times upsert_record() was called
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    /// Requests the reconciler submitted
    pub fn requests(&self) -> Vec<ReconciliationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// A DnsProvider that answers from a script, counts calls, and records
/// submitted requests
pub struct ScriptedProvider {
    zone_reply: ZoneReply,
    upsert_reply: UpsertReply,
    lookups: Arc<AtomicUsize>,
    upserts: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<ReconciliationRequest>>>,
}

impl ScriptedProvider {
    pub fn new(zone_reply: ZoneReply, upsert_reply: UpsertReply) -> Self {
        Self {
            zone_reply,
            upsert_reply,
            lookups: Arc::new(AtomicUsize::new(0)),
            upserts: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn probe(&self) -> ProviderProbe {
        ProviderProbe {
            lookups: Arc::clone(&self.lookups),
            upserts: Arc::clone(&self.upserts),
            requests: Arc::clone(&self.requests),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for ScriptedProvider {
    async fn lookup_zone(&self, _domain: &str) -> Result<ZoneHandle> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match &self.zone_reply {
            ZoneReply::Handle(href) => Ok(ZoneHandle::new(*href)),
            ZoneReply::Malformed(msg) => Err(Error::indeterminate(*msg)),
            ZoneReply::Unreachable(msg) => Err(Error::zone_lookup(*msg)),
        }
    }

    async fn upsert_record(
        &self,
        _zone: &ZoneHandle,
        request: &ReconciliationRequest,
    ) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.upsert_reply {
            UpsertReply::Accept => Ok(()),
            UpsertReply::Reject(msg) => Err(Error::update_rejected(*msg)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
