use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::error::{EntitlementError, ErrorCategory};
use super::fetcher::fetch_subscription;
use super::metrics::record_validation;
use super::rules::evaluate;
use super::store::{KeyFormat, SubscriptionStore};

/// Entry point for entitlement checks.
///
/// Holds no per-call state; clones share the same store handle.
#[derive(Clone)]
pub struct EntitlementValidator {
    store: Arc<dyn SubscriptionStore>,
    key_format: KeyFormat,
}

impl EntitlementValidator {
    pub fn new(store: Arc<dyn SubscriptionStore>, key_format: KeyFormat) -> Self {
        Self { store, key_format }
    }

    pub fn store(&self) -> &Arc<dyn SubscriptionStore> {
        &self.store
    }

    /// Validate the subscription of `customer_number` to `service_name` as of now.
    pub async fn validate(
        &self,
        customer_number: &str,
        service_name: &str,
    ) -> Result<u16, EntitlementError> {
        self.validate_at(customer_number, service_name, Utc::now())
            .await
    }

    /// Validate as of `now`. A zero allowance is reported as `Expired`.
    pub async fn validate_at(
        &self,
        customer_number: &str,
        service_name: &str,
        now: DateTime<Utc>,
    ) -> Result<u16, EntitlementError> {
        let result = self.check(customer_number, service_name, now).await;

        match &result {
            Ok(allowance) => {
                tracing::debug!(
                    customer_number = %customer_number,
                    service = %service_name,
                    allowance = allowance,
                    "Entitlement granted"
                );
                record_validation(service_name, "granted");
            }
            Err(e) => {
                match e.category() {
                    ErrorCategory::Forbidden => tracing::info!(
                        customer_number = %customer_number,
                        service = %service_name,
                        code = e.code(),
                        "Entitlement rejected"
                    ),
                    ErrorCategory::BadRequest => tracing::warn!(
                        customer_number = %customer_number,
                        service = %service_name,
                        code = e.code(),
                        "Invalid entitlement request"
                    ),
                    ErrorCategory::InternalServerError | ErrorCategory::Passthrough => {
                        tracing::error!(
                            customer_number = %customer_number,
                            service = %service_name,
                            code = e.code(),
                            error = %e,
                            "Entitlement check failed"
                        )
                    }
                }
                record_validation(service_name, e.code());
            }
        }

        result
    }

    async fn check(
        &self,
        customer_number: &str,
        service_name: &str,
        now: DateTime<Utc>,
    ) -> Result<u16, EntitlementError> {
        let record = fetch_subscription(
            self.store.as_ref(),
            &self.key_format,
            customer_number,
            service_name,
        )
        .await?;

        let allowance = evaluate(&record, now)?;
        if allowance == 0 {
            return Err(EntitlementError::Expired);
        }
        Ok(allowance)
    }
}
