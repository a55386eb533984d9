//! Loads a subscription record for a (customer, service) pair.

use std::time::Instant;

use super::error::EntitlementError;
use super::metrics::record_store_lookup;
use super::store::{KeyFormat, SubscriptionStore, SUBSCRIPTION_NAMESPACE};
use crate::models::SubscriptionRecord;

/// Fetch and decode the record stored for `customer_number` and `service_name`.
///
/// The decoded record must carry the same identity it was looked up by.
pub async fn fetch_subscription(
    store: &dyn SubscriptionStore,
    key_format: &KeyFormat,
    customer_number: &str,
    service_name: &str,
) -> Result<SubscriptionRecord, EntitlementError> {
    if customer_number.is_empty() || service_name.is_empty() {
        return Err(EntitlementError::InvalidParams);
    }

    let key = key_format.compose(customer_number, service_name);

    let started = Instant::now();
    let lookup = store.get_record(SUBSCRIPTION_NAMESPACE, &key).await;
    let result = match &lookup {
        Ok(Some(_)) => "hit",
        Ok(None) => "miss",
        Err(_) => "error",
    };
    record_store_lookup(result, started.elapsed().as_secs_f64());

    let raw = lookup
        .map_err(EntitlementError::Store)?
        .ok_or(EntitlementError::Unregistered)?;

    let record: Option<SubscriptionRecord> = serde_json::from_slice(&raw)?;
    let record = record.ok_or(EntitlementError::WrongData)?;

    if record.customer_number != customer_number || record.service_name != service_name {
        tracing::warn!(
            customer_number = %customer_number,
            service = %service_name,
            stored_customer_number = %record.customer_number,
            stored_service = %record.service_name,
            "Stored subscription identity does not match lookup key"
        );
        return Err(EntitlementError::WrongCustomer);
    }

    Ok(record)
}
