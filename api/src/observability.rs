use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;
use crate::metrics;

pub const METRICS_PREFIX: &str = "ticket";

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    /// Install the global tracing subscriber and build the metrics registry.
    pub fn init(log_format: LogFormat) -> Result<Self> {
        let registry = Self::registry()?;

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "api=debug,ticket_api=debug,tower_http=debug".into());

        match log_format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?,
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?,
        }

        tracing::info!(format = ?log_format, "Observability stack initialized (Prometheus + tracing)");
        Ok(Self { registry })
    }

    /// Registry with every application metric registered under the
    /// `ticket_` prefix.
    pub fn registry() -> Result<Registry> {
        let registry = Registry::new_custom(Some(METRICS_PREFIX.into()), None)?;
        metrics::register_all(&registry)?;
        Ok(registry)
    }
}
