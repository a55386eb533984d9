//! Services module for entitlement-service.

pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod rules;
pub mod store;
pub mod validator;

pub use error::{EntitlementError, ErrorCategory};
pub use fetcher::fetch_subscription;
pub use metrics::{get_metrics, init_metrics, record_store_lookup, record_validation};
pub use rules::evaluate;
pub use store::{
    KeyFormat, MockSubscriptionStore, RedisSubscriptionStore, SubscriptionStore,
    SUBSCRIPTION_NAMESPACE,
};
pub use validator::EntitlementValidator;
