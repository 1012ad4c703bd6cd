// # driftdns - one-shot DNS reconciler
//
// Thin integration layer: read configuration from environment
// variables, build the components through the registry, run a single
// reconciliation pass, and map the outcome to an exit code. All
// reconciliation logic lives in driftdns-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `DRIFTDNS_API_KEY`: provider API key (required)
// - `DRIFTDNS_DOMAIN`: zone apex domain (required)
// - `DRIFTDNS_RECORD`: record label within the zone, "@" for the apex (required)
// - `DRIFTDNS_DNS_SERVER`: pinned resolver address (default 1.1.1.1)
// - `DRIFTDNS_ECHO_URL`: address-echo endpoint (default https://api.ipify.org)
// - `DRIFTDNS_TTL`: RRset TTL in seconds (default 1200)
// - `DRIFTDNS_TIMEOUT_SECS`: per-call network timeout (default 10)
// - `DRIFTDNS_PROVIDER_TYPE`: provider registry name (default gandi)
// - `DRIFTDNS_LOG_LEVEL`: trace/debug/info/warn/error (default info)
//
// ## Example
//
// ```bash
// export DRIFTDNS_API_KEY=your_key
// export DRIFTDNS_DOMAIN=example.net
// export DRIFTDNS_RECORD=home
//
// driftdns
// ```
//
// Exit code 0 when the pass ends in NoChange or Updated; 1 for any
// failure, including configuration errors. Schedule it from a systemd
// timer or cron for the cadence.

use anyhow::Result;
use driftdns_core::config::{
    AddressSourceConfig, DriftConfig, ProviderConfig, ReconcilerConfig, RecordSourceConfig,
};
use driftdns_core::{ComponentRegistry, Outcome, Reconciler};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for a reconciliation pass
///
/// The invoking scheduler only needs to distinguish "the record is
/// correct now" from "it is not".
#[derive(Debug, Clone, Copy)]
enum RunExitCode {
    /// NoChange or Updated
    Success = 0,
    /// Any failure, including configuration errors
    Failure = 1,
}

impl From<RunExitCode> for ExitCode {
    fn from(code: RunExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    api_key: String,
    domain: String,
    record: String,
    dns_server: String,
    echo_url: String,
    ttl: u32,
    timeout_secs: u64,
    provider_type: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("DRIFTDNS_API_KEY")
                .map_err(|_| anyhow::anyhow!("DRIFTDNS_API_KEY is required"))?,
            domain: env::var("DRIFTDNS_DOMAIN")
                .map_err(|_| anyhow::anyhow!("DRIFTDNS_DOMAIN is required"))?,
            record: env::var("DRIFTDNS_RECORD")
                .map_err(|_| anyhow::anyhow!("DRIFTDNS_RECORD is required"))?,
            dns_server: env::var("DRIFTDNS_DNS_SERVER").unwrap_or_else(|_| "1.1.1.1".to_string()),
            echo_url: env::var("DRIFTDNS_ECHO_URL")
                .unwrap_or_else(|_| driftdns_ip_http::DEFAULT_ECHO_URL.to_string()),
            ttl: env::var("DRIFTDNS_TTL")
                .ok()
                .map(|s| s.parse().unwrap_or(1200))
                .unwrap_or(1200),
            timeout_secs: env::var("DRIFTDNS_TIMEOUT_SECS")
                .ok()
                .map(|s| s.parse().unwrap_or(10))
                .unwrap_or(10),
            provider_type: env::var("DRIFTDNS_PROVIDER_TYPE")
                .unwrap_or_else(|_| "gandi".to_string()),
            log_level: env::var("DRIFTDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration before any I/O happens
    fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!(
                "DRIFTDNS_API_KEY cannot be empty. \
                Set it via: export DRIFTDNS_API_KEY=your_key"
            );
        }

        // Check for obvious placeholder keys (common mistake)
        let key_lower = self.api_key.to_lowercase();
        if key_lower.contains("your_key")
            || key_lower.contains("replace_me")
            || key_lower.contains("example")
        {
            anyhow::bail!(
                "DRIFTDNS_API_KEY appears to be a placeholder. \
                Use an actual API key from your DNS provider."
            );
        }

        self.validate_domain_name(&self.domain)?;

        if self.record.is_empty() {
            anyhow::bail!("DRIFTDNS_RECORD cannot be empty (use \"@\" for the zone apex)");
        }
        if self.record != "@" && self.record.contains('.') {
            anyhow::bail!(
                "DRIFTDNS_RECORD must be a single label within the zone. Got: {}",
                self.record
            );
        }

        if self.dns_server.parse::<std::net::IpAddr>().is_err() {
            anyhow::bail!(
                "DRIFTDNS_DNS_SERVER must be an IP address literal. Got: {}",
                self.dns_server
            );
        }

        if !self.echo_url.starts_with("https://") && !self.echo_url.starts_with("http://") {
            anyhow::bail!(
                "DRIFTDNS_ECHO_URL must use HTTP or HTTPS scheme. Got: {}",
                self.echo_url
            );
        }
        if self.echo_url.starts_with("http://") {
            eprintln!(
                "WARNING: DRIFTDNS_ECHO_URL uses HTTP (not HTTPS). \
                This is less secure. Consider using HTTPS."
            );
        }

        if self.ttl == 0 {
            anyhow::bail!("DRIFTDNS_TTL must be > 0");
        }

        if !(1..=120).contains(&self.timeout_secs) {
            anyhow::bail!(
                "DRIFTDNS_TIMEOUT_SECS must be between 1 and 120 seconds. Got: {}",
                self.timeout_secs
            );
        }

        match self.provider_type.as_str() {
            "gandi" => {}
            _ => anyhow::bail!(
                "DRIFTDNS_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: gandi",
                self.provider_type
            ),
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DRIFTDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Validate that a string is a valid domain name
    ///
    /// Basic DNS domain name validation per RFC 1035; not comprehensive,
    /// but catches common errors before the first network call.
    fn validate_domain_name(&self, domain: &str) -> Result<()> {
        if domain.is_empty() {
            anyhow::bail!("DRIFTDNS_DOMAIN cannot be empty");
        }

        // Total length limit (RFC 1035: 253 chars max)
        if domain.len() > 253 {
            anyhow::bail!(
                "Domain name too long: {} chars (max 253). Got: {}",
                domain.len(),
                domain
            );
        }

        if !domain.contains('.') {
            anyhow::bail!("DRIFTDNS_DOMAIN must be a zone apex like example.net. Got: {}", domain);
        }

        for label in domain.split('.') {
            if label.is_empty() {
                anyhow::bail!("Domain name has empty label: '{}'", domain);
            }

            if label.len() > 63 {
                anyhow::bail!(
                    "Domain label too long: {} chars (max 63). Label: '{}'",
                    label.len(),
                    label
                );
            }

            if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
                anyhow::bail!(
                    "Domain label contains invalid characters. Label: '{}'. \
                    Valid: alphanumeric and hyphen only.",
                    label
                );
            }

            if label.starts_with('-') || label.ends_with('-') {
                anyhow::bail!(
                    "Domain label cannot start or end with hyphen. Label: '{}'",
                    label
                );
            }
        }

        Ok(())
    }

    /// Map the environment values onto the core configuration types
    fn to_drift_config(&self) -> DriftConfig {
        DriftConfig {
            address_source: AddressSourceConfig::Http {
                url: self.echo_url.clone(),
                timeout_secs: self.timeout_secs,
            },
            record_source: RecordSourceConfig::Dns {
                resolver: self.dns_server.clone(),
                timeout_secs: self.timeout_secs,
            },
            provider: ProviderConfig::Gandi {
                api_key: self.api_key.clone(),
                api_base: None,
            },
            reconciler: ReconcilerConfig::new(self.domain.clone(), self.record.clone())
                .with_ttl(self.ttl),
        }
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return RunExitCode::Failure.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("configuration validation error: {}", e);
        return RunExitCode::Failure.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
        return RunExitCode::Failure.into();
    }

    // One pass, run to completion: a current-thread runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return RunExitCode::Failure.into();
        }
    };

    match rt.block_on(run_once(config)) {
        Ok(outcome) if outcome.is_success() => RunExitCode::Success.into(),
        Ok(_) => RunExitCode::Failure.into(),
        Err(e) => {
            error!("reconciliation failed: {}", e);
            RunExitCode::Failure.into()
        }
    }
}

/// Run one reconciliation pass
async fn run_once(config: Config) -> Result<Outcome> {
    // Register built-in components
    let registry = ComponentRegistry::new();
    driftdns_ip_http::register(&registry);
    driftdns_record_dns::register(&registry);
    driftdns_provider_gandi::register(&registry);

    let drift = config.to_drift_config();
    drift.validate()?;

    let address_source = registry.create_address_source(&drift.address_source)?;
    let record_source = registry.create_record_source(&drift.record_source)?;
    let provider = registry.create_provider(&drift.provider)?;

    let reconciler = Reconciler::new(address_source, record_source, provider, drift.reconciler)?;

    let outcome = reconciler.run().await?;

    match &outcome {
        Outcome::NoChange { address } => {
            info!("record already correct ({})", address);
        }
        Outcome::Updated { previous, address } => {
            info!("record updated: {} -> {}", previous, address);
        }
        Outcome::UpdateFailed { reason } => {
            error!("update failed: {}", reason);
        }
        Outcome::Indeterminate { reason } => {
            warn!("outcome indeterminate: {}", reason);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            api_key: "k3y-abcdef123456".to_string(),
            domain: "example.net".to_string(),
            record: "home".to_string(),
            dns_server: "1.1.1.1".to_string(),
            echo_url: "https://api.ipify.org".to_string(),
            ttl: 1200,
            timeout_secs: 10,
            provider_type: "gandi".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn placeholder_api_key_is_rejected() {
        let config = Config {
            api_key: "your_key".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn hostname_resolver_is_rejected() {
        let config = Config {
            dns_server: "resolver.example.net".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn multi_label_record_is_rejected() {
        let config = Config {
            record: "a.b".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn apex_record_is_accepted() {
        let config = Config {
            record: "@".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bare_label_domain_is_rejected() {
        let config = Config {
            domain: "localhost".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_provider_type_is_rejected() {
        let config = Config {
            provider_type: "route53".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = Config {
            log_level: "loud".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn drift_config_mapping_carries_the_ttl() {
        let drift = valid_config().to_drift_config();
        assert!(drift.validate().is_ok());
        assert_eq!(drift.reconciler.ttl, 1200);
        assert_eq!(drift.reconciler.fqdn(), "home.example.net");
    }
}
