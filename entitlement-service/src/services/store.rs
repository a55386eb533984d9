use async_trait::async_trait;
use redis::{aio::ConnectionManager, Client};
use std::collections::HashMap;

/// Redis hash holding every serialized subscription record.
pub const SUBSCRIPTION_NAMESPACE: &str = "onsky:payment:subscriptions";

/// Read access to the store that holds serialized subscription records.
///
/// A missing key is `Ok(None)`. Every other failure is an `Err` and is
/// surfaced to the caller unchanged.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn get_record(&self, namespace: &str, key: &str)
        -> Result<Option<Vec<u8>>, anyhow::Error>;
    async fn health_check(&self) -> Result<(), anyhow::Error>;
}

/// How the lookup key is built from the customer number and service name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyFormat {
    /// `customer_number + service_name`, the layout existing records use.
    #[default]
    Concatenated,
    /// `customer_number + sep + service_name`.
    Delimited(String),
}

impl KeyFormat {
    pub fn compose(&self, customer_number: &str, service_name: &str) -> String {
        match self {
            KeyFormat::Concatenated => format!("{}{}", customer_number, service_name),
            KeyFormat::Delimited(sep) => format!("{}{}{}", customer_number, sep, service_name),
        }
    }
}

#[derive(Clone)]
pub struct RedisSubscriptionStore {
    _client: Client,
    manager: ConnectionManager,
}

impl RedisSubscriptionStore {
    pub async fn new(config: &crate::config::RedisConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(url = %config.url, "Connecting to Redis");
        let client = Client::open(config.url.clone())?;

        let manager = client.get_connection_manager().await.map_err(|e| {
            tracing::error!("Failed to get Redis connection manager: {}", e);
            anyhow::anyhow!("Failed to connect to Redis: {}", e)
        })?;

        tracing::info!("Successfully connected to Redis");

        Ok(Self {
            _client: client,
            manager,
        })
    }
}

#[async_trait]
impl SubscriptionStore for RedisSubscriptionStore {
    async fn get_record(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, anyhow::Error> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = redis::cmd("HGET")
            .arg(namespace)
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read subscription record: {}", e))?;

        Ok(value)
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("Redis health check failed: {}", e))
    }
}

/// In-memory store for tests and local runs.
pub struct MockSubscriptionStore {
    pub records: std::sync::Mutex<HashMap<(String, String), Vec<u8>>>,
    pub failure: std::sync::Mutex<Option<String>>,
}

impl Default for MockSubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSubscriptionStore {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(HashMap::new()),
            failure: std::sync::Mutex::new(None),
        }
    }

    pub fn insert(&self, namespace: &str, key: &str, value: impl Into<Vec<u8>>) {
        if let Ok(mut records) = self.records.lock() {
            records.insert((namespace.to_string(), key.to_string()), value.into());
        }
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(message.to_string());
        }
    }

    fn injected_failure(&self) -> Result<(), anyhow::Error> {
        let failure = self
            .failure
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock store mutex poisoned: {}", e))?;
        match failure.as_ref() {
            Some(message) => Err(anyhow::anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SubscriptionStore for MockSubscriptionStore {
    async fn get_record(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, anyhow::Error> {
        self.injected_failure()?;
        let value = self
            .records
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock store mutex poisoned: {}", e))?
            .get(&(namespace.to_string(), key.to_string()))
            .cloned();
        Ok(value)
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        self.injected_failure()
    }
}
