//! Plugin-based component registry
//!
//! The registry allows DNS providers, address sources, and record
//! sources to be registered dynamically at runtime, avoiding hardcoded
//! if-else chains in the binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use driftdns_core::ComponentRegistry;
//! use driftdns_core::config::ProviderConfig;
//!
//! let registry = ComponentRegistry::new();
//! driftdns_provider_gandi::register(&registry);
//!
//! let config = ProviderConfig::Gandi { /* ... */ };
//! let provider = registry.create_provider(&config)?;
//! ```
//!
//! ## Registration
//!
//! Implementation crates expose a `register()` function that installs
//! their factory under the type name their configuration variant maps
//! to ("gandi", "http", "dns", ...).

use crate::config::{AddressSourceConfig, ProviderConfig, RecordSourceConfig};
use crate::error::{Error, Result};
use crate::traits::{AddressSource, DnsProvider, RecordSource};
use crate::traits::{AddressSourceFactory, DnsProviderFactory, RecordSourceFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Registry for plugin-based component creation
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing
/// concurrent reads and exclusive writes.
#[derive(Default)]
pub struct ComponentRegistry {
    /// Registered DNS provider factories
    providers: RwLock<HashMap<String, Box<dyn DnsProviderFactory>>>,

    /// Registered address source factories
    address_sources: RwLock<HashMap<String, Box<dyn AddressSourceFactory>>>,

    /// Registered record source factories
    record_sources: RwLock<HashMap<String, Box<dyn RecordSourceFactory>>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DNS provider factory
    ///
    /// # Parameters
    ///
    /// - `name`: provider type name (e.g. "gandi")
    /// - `factory`: factory object for creating provider instances
    pub fn register_provider(&self, name: impl Into<String>, factory: Box<dyn DnsProviderFactory>) {
        let name = name.into();
        let mut providers = self.providers.write().unwrap();
        providers.insert(name, factory);
    }

    /// Register an address source factory
    ///
    /// # Parameters
    ///
    /// - `name`: address source type name (e.g. "http")
    /// - `factory`: factory object for creating source instances
    pub fn register_address_source(
        &self,
        name: impl Into<String>,
        factory: Box<dyn AddressSourceFactory>,
    ) {
        let name = name.into();
        let mut sources = self.address_sources.write().unwrap();
        sources.insert(name, factory);
    }

    /// Register a record source factory
    ///
    /// # Parameters
    ///
    /// - `name`: record source type name (e.g. "dns")
    /// - `factory`: factory object for creating source instances
    pub fn register_record_source(
        &self,
        name: impl Into<String>,
        factory: Box<dyn RecordSourceFactory>,
    ) {
        let name = name.into();
        let mut sources = self.record_sources.write().unwrap();
        sources.insert(name, factory);
    }

    /// Create a DNS provider from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DnsProvider>)`: created provider instance
    /// - `Err(Error)`: if the type is not registered or creation fails
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        let provider_type = config.type_name();
        let providers = self.providers.read().unwrap();

        let factory = providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// Create an address source from configuration
    pub fn create_address_source(
        &self,
        config: &AddressSourceConfig,
    ) -> Result<Box<dyn AddressSource>> {
        let source_type = match config {
            AddressSourceConfig::Http { .. } => "http",
            AddressSourceConfig::Custom { factory, .. } => factory,
        };

        let sources = self.address_sources.read().unwrap();

        let factory = sources
            .get(source_type)
            .ok_or_else(|| Error::config(format!("unknown address source type: {}", source_type)))?;

        factory.create(config)
    }

    /// Create a record source from configuration
    pub fn create_record_source(
        &self,
        config: &RecordSourceConfig,
    ) -> Result<Box<dyn RecordSource>> {
        let source_type = match config {
            RecordSourceConfig::Dns { .. } => "dns",
            RecordSourceConfig::Custom { factory, .. } => factory,
        };

        let sources = self.record_sources.read().unwrap();

        let factory = sources
            .get(source_type)
            .ok_or_else(|| Error::config(format!("unknown record source type: {}", source_type)))?;

        factory.create(config)
    }

    /// List all registered provider types
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap();
        providers.keys().cloned().collect()
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self.providers.read().unwrap();
        providers.contains_key(name)
    }

    /// Check if an address source type is registered
    pub fn has_address_source(&self, name: &str) -> bool {
        let sources = self.address_sources.read().unwrap();
        sources.contains_key(name)
    }

    /// Check if a record source type is registered
    pub fn has_record_source(&self, name: &str) -> bool {
        let sources = self.record_sources.read().unwrap();
        sources.contains_key(name)
    }
}
