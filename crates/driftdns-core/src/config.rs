//! Configuration types for the reconciler
//!
//! This module defines all configuration structures used throughout the
//! crate. The binary maps its environment variables onto these types;
//! the core consumes only the resolved values.

use serde::{Deserialize, Serialize};

/// Top-level reconciler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Observed-address source configuration
    pub address_source: AddressSourceConfig,

    /// Published-record source configuration
    pub record_source: RecordSourceConfig,

    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// The record to reconcile
    pub reconciler: ReconcilerConfig,
}

impl DriftConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.address_source.validate()?;
        self.record_source.validate()?;
        self.provider.validate()?;
        self.reconciler.validate()?;
        Ok(())
    }
}

/// Observed-address source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AddressSourceConfig {
    /// HTTP address-echo source (plain-text response)
    Http {
        /// Echo endpoint to fetch the address from
        url: String,
        /// Request timeout in seconds
        timeout_secs: u64,
    },

    /// Custom address source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl AddressSourceConfig {
    /// Validate the address source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            AddressSourceConfig::Http { url, timeout_secs } => {
                if url.is_empty() {
                    return Err(crate::Error::config("address echo URL cannot be empty"));
                }
                if !url.starts_with("https://") && !url.starts_with("http://") {
                    return Err(crate::Error::config(format!(
                        "address echo URL must use HTTP or HTTPS: {}",
                        url
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("address echo timeout must be > 0"));
                }
                Ok(())
            }
            AddressSourceConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "custom address source factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "custom address source config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Published-record source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordSourceConfig {
    /// DNS query against an explicitly pinned resolver
    Dns {
        /// Resolver address (never the system default, to avoid stale
        /// local caching)
        resolver: String,
        /// Query timeout in seconds
        timeout_secs: u64,
    },

    /// Custom record source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl RecordSourceConfig {
    /// Validate the record source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            RecordSourceConfig::Dns {
                resolver,
                timeout_secs,
            } => {
                if resolver.parse::<std::net::IpAddr>().is_err() {
                    return Err(crate::Error::config(format!(
                        "resolver must be an IP address literal: {}",
                        resolver
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("resolver timeout must be > 0"));
                }
                Ok(())
            }
            RecordSourceConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "custom record source factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "custom record source config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Gandi LiveDNS provider
    Gandi {
        /// LiveDNS API key
        api_key: String,
        /// API base URL override (tests point this at a mock server)
        api_base: Option<String>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Gandi { api_key, .. } => {
                if api_key.is_empty() {
                    return Err(crate::Error::config("Gandi API key cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config("custom provider config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Gandi { .. } => "gandi",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

/// The record to reconcile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Zone apex domain (e.g. "example.net")
    pub domain: String,

    /// Record label within the zone (e.g. "home", or "@" for the apex)
    pub record: String,

    /// TTL in seconds applied to upserts
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl ReconcilerConfig {
    /// Create a configuration with the default TTL
    pub fn new(domain: impl Into<String>, record: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            record: record.into(),
            ttl: default_ttl(),
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// The fully qualified name the record resolves under
    pub fn fqdn(&self) -> String {
        if self.record == "@" {
            self.domain.clone()
        } else {
            format!("{}.{}", self.record, self.domain)
        }
    }

    /// Validate the reconciler configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.domain.is_empty() {
            return Err(crate::Error::config("domain cannot be empty"));
        }
        if !self.domain.contains('.') || self.domain.len() > 253 {
            return Err(crate::Error::config(format!(
                "not a valid zone apex: {}",
                self.domain
            )));
        }
        if self.record.is_empty() {
            return Err(crate::Error::config("record label cannot be empty"));
        }
        if self.record != "@" && (self.record.contains('.') || self.record.len() > 63) {
            return Err(crate::Error::config(format!(
                "record must be a single label within the zone: {}",
                self.record
            )));
        }
        if self.ttl == 0 {
            return Err(crate::Error::config("TTL must be > 0"));
        }
        Ok(())
    }
}

fn default_ttl() -> u32 {
    1200
}
