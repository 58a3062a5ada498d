use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use shared::RegistrationRecord;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{StoreConfig, StorePolicy};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Registration store unavailable: {0}")]
    Unavailable(String),
}

/// Registrations keyed by wallet address.
///
/// Every write fully replaces the record for its address, so concurrent
/// submissions for the same address resolve to the last one applied.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn get(&self, address: &str) -> Result<Option<RegistrationRecord>, StoreError>;

    /// Insert or replace the record for `address`. Returns the record it
    /// replaced, if any.
    async fn upsert(
        &self,
        address: &str,
        record: RegistrationRecord,
    ) -> Result<Option<RegistrationRecord>, StoreError>;

    /// Number of distinct addresses currently stored.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Unbounded map living as long as the process. Nothing is evicted.
#[derive(Default)]
pub struct InMemoryRegistrationStore {
    records: RwLock<HashMap<String, RegistrationRecord>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn get(&self, address: &str) -> Result<Option<RegistrationRecord>, StoreError> {
        Ok(self.records.read().await.get(address).cloned())
    }

    async fn upsert(
        &self,
        address: &str,
        record: RegistrationRecord,
    ) -> Result<Option<RegistrationRecord>, StoreError> {
        Ok(self.records.write().await.insert(address.to_string(), record))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }
}

/// Capacity-bounded store backed by Moka (TinyLFU eviction). Old
/// registrations may be evicted once `capacity` addresses are stored.
pub struct BoundedRegistrationStore {
    cache: MokaCache<String, RegistrationRecord>,
}

impl BoundedRegistrationStore {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(capacity).build(),
        }
    }
}

#[async_trait]
impl RegistrationStore for BoundedRegistrationStore {
    async fn get(&self, address: &str) -> Result<Option<RegistrationRecord>, StoreError> {
        Ok(self.cache.get(address).await)
    }

    async fn upsert(
        &self,
        address: &str,
        record: RegistrationRecord,
    ) -> Result<Option<RegistrationRecord>, StoreError> {
        let previous = self.cache.get(address).await;
        self.cache.insert(address.to_string(), record).await;
        Ok(previous)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        // entry_count lags behind writes until pending maintenance runs
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count())
    }
}

/// Build the store selected by configuration.
pub fn build_store(config: &StoreConfig) -> Arc<dyn RegistrationStore> {
    match config.policy {
        StorePolicy::Memory => Arc::new(InMemoryRegistrationStore::new()),
        StorePolicy::Bounded => Arc::new(BoundedRegistrationStore::new(config.capacity)),
    }
}
