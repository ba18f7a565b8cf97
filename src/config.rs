/// Configuration management for the SvarInn catalog client
use crate::error::{KatalogError, KatalogResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KatalogConfig {
    /// Shared Fiks API host
    pub fiks_api: HostConfig,
    /// Catalog-specific overrides, falling back to `fiks_api`
    pub katalog: HostOverride,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub logging: LoggingConfig,
}

/// Fully specified host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostConfig {
    pub host: String,
    pub port: u16,
    pub scheme: String,
}

/// Optional per-service host settings
///
/// Fields left out are taken from the Fiks API host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostOverride {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub scheme: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "svarinn_katalog=info".to_string(),
            json: false,
        }
    }
}

impl Default for KatalogConfig {
    fn default() -> Self {
        Self {
            fiks_api: HostConfig {
                host: "api.fiks.ks.no".to_string(),
                port: 443,
                scheme: "https".to_string(),
            },
            katalog: HostOverride::default(),
            timeout_secs: 10,
            user_agent: format!("svarinn-katalog/{}", env!("CARGO_PKG_VERSION")),
            logging: LoggingConfig::default(),
        }
    }
}

impl HostOverride {
    /// Resolve against a fallback host
    pub fn resolve(&self, fallback: &HostConfig) -> HostConfig {
        HostConfig {
            host: self.host.clone().unwrap_or_else(|| fallback.host.clone()),
            port: self.port.unwrap_or(fallback.port),
            scheme: self.scheme.clone().unwrap_or_else(|| fallback.scheme.clone()),
        }
    }
}

impl KatalogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> KatalogResult<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> KatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let fiks_api = HostConfig {
            host: var("FIKS_API_HOST").unwrap_or(defaults.fiks_api.host),
            port: match var("FIKS_API_PORT") {
                Some(port) => parse_port("FIKS_API_PORT", &port)?,
                None => defaults.fiks_api.port,
            },
            scheme: var("FIKS_API_SCHEME").unwrap_or(defaults.fiks_api.scheme),
        };

        let katalog = HostOverride {
            host: var("SVARINN_KATALOG_HOST").filter(|s| !s.is_empty()),
            port: var("SVARINN_KATALOG_PORT")
                .map(|port| parse_port("SVARINN_KATALOG_PORT", &port))
                .transpose()?,
            scheme: var("SVARINN_KATALOG_SCHEME").filter(|s| !s.is_empty()),
        };

        let timeout_secs = match var("SVARINN_KATALOG_TIMEOUT_SECS") {
            Some(secs) => secs.parse().map_err(|_| {
                KatalogError::Config(format!("Invalid SVARINN_KATALOG_TIMEOUT_SECS: {}", secs))
            })?,
            None => defaults.timeout_secs,
        };

        let user_agent = var("SVARINN_USER_AGENT").unwrap_or(defaults.user_agent);

        let logging = LoggingConfig {
            level: var("RUST_LOG").unwrap_or(defaults.logging.level),
            json: var("SVARINN_LOG_JSON")
                .map(|v| v.parse().unwrap_or(false))
                .unwrap_or(false),
        };

        Ok(KatalogConfig {
            fiks_api,
            katalog,
            timeout_secs,
            user_agent,
            logging,
        })
    }

    /// Effective catalog host after applying overrides
    pub fn katalog_host(&self) -> HostConfig {
        self.katalog.resolve(&self.fiks_api)
    }

    /// Base URL of the catalog, e.g. `https://api.fiks.ks.no:443`
    pub fn base_url(&self) -> String {
        let host = self.katalog_host();
        format!("{}://{}:{}", host.scheme, host.host, host.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> KatalogResult<()> {
        let host = self.katalog_host();

        if host.host.is_empty() {
            return Err(KatalogError::Config("Host cannot be empty".to_string()));
        }

        if host.scheme != "http" && host.scheme != "https" {
            return Err(KatalogError::Config(format!(
                "Unsupported scheme: {}",
                host.scheme
            )));
        }

        if host.port == 0 {
            return Err(KatalogError::Config("Port cannot be 0".to_string()));
        }

        if self.timeout_secs == 0 {
            return Err(KatalogError::Config(
                "Timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_port(name: &str, value: &str) -> KatalogResult<u16> {
    value
        .parse()
        .map_err(|_| KatalogError::Config(format!("Invalid {}: {}", name, value)))
}
