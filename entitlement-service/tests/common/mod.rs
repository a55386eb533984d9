//! Test helper module for entitlement-service integration tests.
//!
//! Spawns the HTTP application on a random port over an in-memory store.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use entitlement_service::config::{EntitlementConfig, Environment, RedisConfig};
use entitlement_service::services::{
    KeyFormat, MockSubscriptionStore, SubscriptionStore, SUBSCRIPTION_NAMESPACE,
};
use entitlement_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const TEST_CUSTOMER: &str = "C-1001";
pub const TEST_SERVICE: &str = "camera";

pub fn test_config() -> EntitlementConfig {
    EntitlementConfig {
        common: CoreConfig { port: 0 },
        environment: Environment::Dev,
        service_name: "entitlement-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        redis: RedisConfig {
            url: "redis://127.0.0.1:6379".to_string(),
        },
        key_format: KeyFormat::Concatenated,
    }
}

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<MockSubscriptionStore>,
}

impl TestApp {
    /// Spawn a new test application on a random port.
    pub async fn spawn() -> Self {
        let store = Arc::new(MockSubscriptionStore::new());
        let app = Application::build_with_store(
            test_config(),
            store.clone() as Arc<dyn SubscriptionStore>,
        )
        .await
        .expect("Failed to build application");

        let port = app.port();
        tokio::spawn(app.run_until_stopped());

        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
            store,
        }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::new()
    }

    /// Store `record` under the legacy concatenated key.
    pub fn put_record(&self, customer_number: &str, service: &str, record: &serde_json::Value) {
        self.store.insert(
            SUBSCRIPTION_NAMESPACE,
            &format!("{}{}", customer_number, service),
            record.to_string(),
        );
    }

    pub async fn validate(&self, customer_number: &str, service: &str) -> reqwest::Response {
        self.client()
            .get(format!(
                "{}/v1/entitlements/{}/{}",
                self.address, customer_number, service
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// A valid quota-only record for the test customer.
pub fn quota_record(quota: u16) -> serde_json::Value {
    serde_json::json!({
        "uuid": "sub-quota",
        "package_id": "pkg-quota",
        "start_date": "2024-01-01T00:00:00Z",
        "end_date": "2024-02-01T00:00:00Z",
        "type": 2,
        "meta": {},
        "duration": 0,
        "interval_time": 0,
        "quota": quota,
        "old_price": 10.0,
        "customer_number": TEST_CUSTOMER,
        "service": TEST_SERVICE,
        "status": 2,
        "have_trial_package": false,
        "trial_duration": 0
    })
}

/// A time-window record spanning `now - 10h ..= now + 10h`.
pub fn time_window_record(now: DateTime<Utc>, duration: u16, quota: u16) -> serde_json::Value {
    serde_json::json!({
        "uuid": "sub-window",
        "package_id": "pkg-window",
        "start_date": now - Duration::hours(10),
        "end_date": now + Duration::hours(10),
        "type": 1,
        "duration": duration,
        "interval_time": 0,
        "quota": quota,
        "old_price": 25.0,
        "customer_number": TEST_CUSTOMER,
        "service": TEST_SERVICE,
        "status": 2,
        "have_trial_package": false,
        "trial_duration": 0
    })
}
