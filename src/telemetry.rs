/// Tracing setup for applications embedding the catalog client
use crate::{
    config::LoggingConfig,
    error::{KatalogError, KatalogResult},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> KatalogResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| KatalogError::Config(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| KatalogError::Config(format!("Failed to install tracing subscriber: {}", e)))
}
