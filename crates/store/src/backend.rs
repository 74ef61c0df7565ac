use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::rest::RestStore;
use crate::StoreError;

/// Key read by the default [`KeyValueStore::ping`].
pub const PING_KEY: &str = "health:ping";

/// String key-value storage reached by the application.
///
/// Read a value by key, write a value by key. A missing key is `Ok(None)`,
/// never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieve a value by key.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Round-trip check used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError> {
        self.get(PING_KEY).await.map(|_| ())
    }

    /// Short backend name for logs and health output.
    fn kind(&self) -> &'static str;
}

/// Settings for selecting and building a store.
///
/// An empty `endpoint` selects the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the Redis REST endpoint.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token sent with every request, if set.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn rest<E: Into<String>>(endpoint: E, auth_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Build the backend this config describes.
    pub fn build(&self) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        if self.endpoint.trim().is_empty() {
            tracing::warn!("No store endpoint configured, using in-memory store");
            return Ok(Arc::new(InMemoryStore::new()));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(Arc::new(RestStore::new(self)?))
    }
}

/// An in-memory store using a `RwLock` around a `HashMap`.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for seeding tests.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "in_memory"
    }
}
