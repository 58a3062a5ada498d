use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::observability::Observability;
use crate::store::{build_store, RegistrationStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub store: Arc<dyn RegistrationStore>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: ApiConfig, store: Arc<dyn RegistrationStore>, registry: Registry) -> Self {
        Self {
            config: Arc::new(config),
            store,
            started_at: Instant::now(),
            registry,
        }
    }

    /// State with the store selected by `config` and a private `ticket_`
    /// registry, for embedding the router without installing a subscriber.
    pub fn standalone(config: ApiConfig) -> Self {
        let registry = Observability::registry().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to build metrics registry");
            Registry::new()
        });
        let store = build_store(&config.store);
        Self::new(config, store, registry)
    }
}
