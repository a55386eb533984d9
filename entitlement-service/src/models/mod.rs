//! Data models for entitlement-service.

pub mod subscription;

pub use subscription::{BillingModel, SubscriptionRecord, SubscriptionStatus};
