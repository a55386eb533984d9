//! Metrics module for entitlement-service.
//! Provides Prometheus metrics for validation outcomes and store latency.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Store lookup duration histogram
pub static STORE_LOOKUP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!(
            "entitlement_store_lookup_duration_seconds",
            "Subscription store lookup duration",
            vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
        ),
        &["result"]
    )
    .expect("Failed to register STORE_LOOKUP_DURATION")
});

/// Validation outcomes, labelled `granted` or by failure code
pub static VALIDATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    VALIDATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "entitlement_validations_total",
                "Total entitlement validations by service and outcome"
            ),
            &["service", "outcome"]
        )
        .expect("Failed to register VALIDATIONS_TOTAL")
    });

    let _ = &*STORE_LOOKUP_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record a validation outcome.
pub fn record_validation(service: &str, outcome: &str) {
    if let Some(counter) = VALIDATIONS_TOTAL.get() {
        counter.with_label_values(&[service, outcome]).inc();
    }
}

/// Record how long a store lookup took.
pub fn record_store_lookup(result: &str, duration_secs: f64) {
    STORE_LOOKUP_DURATION
        .with_label_values(&[result])
        .observe(duration_secs);
}
