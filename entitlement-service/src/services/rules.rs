//! Subscription validation rules.
//!
//! Judges a record against the current instant and computes the allowance it
//! grants. Checks run in a fixed order and stop at the first failure:
//! status, price, quota, then the checks of the record's billing model.

use chrono::{DateTime, Datelike, Utc};

use super::error::EntitlementError;
use crate::models::{BillingModel, SubscriptionRecord};

/// Evaluate `record` at `now`, returning the allowance it grants.
///
/// Time-based models return `quota`, not the validated duration.
pub fn evaluate(record: &SubscriptionRecord, now: DateTime<Utc>) -> Result<u16, EntitlementError> {
    if !record.status.is_active() {
        return Err(EntitlementError::InactiveSubscription);
    }
    if record.base_price.is_nan() || record.base_price <= 0.0 {
        return Err(EntitlementError::InvalidPrice);
    }
    if record.quota == 0 {
        return Err(EntitlementError::InvalidQuota);
    }

    match record.billing_model {
        BillingModel::QuotaOnly => evaluate_quota_only(record),
        BillingModel::TimeWindow => evaluate_time_window(record, now),
        BillingModel::IntervalRecurring => evaluate_interval(record, now),
        BillingModel::Unknown(_) => Err(EntitlementError::InvalidType),
    }
}

fn evaluate_quota_only(record: &SubscriptionRecord) -> Result<u16, EntitlementError> {
    if record.duration_hours != 0 {
        return Err(EntitlementError::InvalidDuration);
    }
    if record.interval_months != 0 {
        return Err(EntitlementError::InvalidIntervalTime);
    }

    let mut quota = record.quota;
    if record.has_trial {
        if record.trial_allowance == 0 {
            return Err(EntitlementError::InvalidTrialDuration);
        }
        // Saturate rather than wrap: a wrapped sum could reach 0, and every
        // model already rejects a zero quota, so `Expired` never comes from here.
        quota = quota.saturating_add(record.trial_allowance);
    }
    Ok(quota)
}

fn evaluate_time_window(
    record: &SubscriptionRecord,
    now: DateTime<Utc>,
) -> Result<u16, EntitlementError> {
    check_window(record, now)?;
    if record.interval_months != 0 {
        return Err(EntitlementError::InvalidIntervalTime);
    }
    if record.duration_hours == 0 {
        return Err(EntitlementError::InvalidDuration);
    }

    if record.has_trial {
        if record.trial_allowance == 0 {
            return Err(EntitlementError::InvalidTrialDuration);
        }
        tracing::debug!(
            customer_number = %record.customer_number,
            service = %record.service_name,
            duration_hours = record.duration_hours,
            trial_adjusted_hours = record.duration_hours.saturating_add(record.trial_allowance),
            "Trial extends time window duration"
        );
    }

    if i64::from(record.duration_hours) > window_hours(record) {
        return Err(EntitlementError::InvalidDuration);
    }

    Ok(record.quota)
}

fn evaluate_interval(
    record: &SubscriptionRecord,
    now: DateTime<Utc>,
) -> Result<u16, EntitlementError> {
    check_window(record, now)?;
    if record.interval_months == 0 {
        return Err(EntitlementError::InvalidIntervalTime);
    }

    let range_hours = window_hours(record);
    let interval_hours = i64::from(record.interval_months) * i64::from(now.day()) * 24;
    let intervals = range_hours / interval_hours;

    if record.duration_hours == 0 || i64::from(record.duration_hours) != intervals {
        return Err(EntitlementError::InvalidDuration);
    }

    Ok(record.quota)
}

/// `now` must fall inside `[start_date, end_date]` and the window must not be inverted.
fn check_window(record: &SubscriptionRecord, now: DateTime<Utc>) -> Result<(), EntitlementError> {
    if record.start_date > now || record.end_date < now || record.end_date < record.start_date {
        return Err(EntitlementError::InvalidDate);
    }
    Ok(())
}

/// Whole hours between start and end, truncated.
fn window_hours(record: &SubscriptionRecord) -> i64 {
    (record.end_date - record.start_date).num_hours()
}
