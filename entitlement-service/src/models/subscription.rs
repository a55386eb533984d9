//! Subscription record model.
//!
//! The record is written by the provisioning system and read here as an
//! immutable snapshot. Field names on the wire follow the persisted layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a subscription grants its allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum BillingModel {
    /// Fixed-duration entitlement anchored to a date range.
    TimeWindow,
    /// Quota only, never time-bounded.
    QuotaOnly,
    /// Re-granted every N months within an overall window.
    IntervalRecurring,
    /// A code this service does not recognise. Kept so the record still
    /// decodes and is rejected by the rule evaluator.
    Unknown(u8),
}

impl BillingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingModel::TimeWindow => "time_window",
            BillingModel::QuotaOnly => "quota_only",
            BillingModel::IntervalRecurring => "interval_recurring",
            BillingModel::Unknown(_) => "unknown",
        }
    }
}

impl Default for BillingModel {
    fn default() -> Self {
        BillingModel::Unknown(0)
    }
}

impl From<u8> for BillingModel {
    fn from(value: u8) -> Self {
        match value {
            1 => BillingModel::TimeWindow,
            2 => BillingModel::QuotaOnly,
            3 => BillingModel::IntervalRecurring,
            other => BillingModel::Unknown(other),
        }
    }
}

impl From<BillingModel> for u8 {
    fn from(value: BillingModel) -> Self {
        match value {
            BillingModel::TimeWindow => 1,
            BillingModel::QuotaOnly => 2,
            BillingModel::IntervalRecurring => 3,
            BillingModel::Unknown(code) => code,
        }
    }
}

/// Subscription status as set by the provisioning system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Suspended,
    Cancelled,
    Other(u8),
}

impl SubscriptionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Other(0)
    }
}

impl From<u8> for SubscriptionStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => SubscriptionStatus::Pending,
            2 => SubscriptionStatus::Active,
            3 => SubscriptionStatus::Suspended,
            4 => SubscriptionStatus::Cancelled,
            other => SubscriptionStatus::Other(other),
        }
    }
}

impl From<SubscriptionStatus> for u8 {
    fn from(value: SubscriptionStatus) -> Self {
        match value {
            SubscriptionStatus::Pending => 1,
            SubscriptionStatus::Active => 2,
            SubscriptionStatus::Suspended => 3,
            SubscriptionStatus::Cancelled => 4,
            SubscriptionStatus::Other(code) => code,
        }
    }
}

/// Stand-in for an absent timestamp. Only time-based models read the dates,
/// and any window anchored here has already ended.
fn unset_date() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

/// One customer's entitlement to one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub package_id: String,
    #[serde(default = "unset_date")]
    pub start_date: DateTime<Utc>,
    #[serde(default = "unset_date")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub billing_model: BillingModel,
    #[serde(default)]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
    /// Hours of entitlement.
    #[serde(rename = "duration", default)]
    pub duration_hours: u16,
    /// Recurrence granularity in months.
    #[serde(rename = "interval_time", default)]
    pub interval_months: u16,
    #[serde(default)]
    pub quota: u16,
    #[serde(rename = "old_price", default)]
    pub base_price: f64,
    pub customer_number: String,
    #[serde(rename = "service")]
    pub service_name: String,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(rename = "have_trial_package", default)]
    pub has_trial: bool,
    /// Bonus hours or quota units granted by a trial.
    #[serde(rename = "trial_duration", default)]
    pub trial_allowance: u16,
}
