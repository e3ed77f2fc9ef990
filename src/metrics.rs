//! Prometheus metrics for request outcomes and store latency.
//!
//! Without an installed recorder every macro here is a no-op, so tests and
//! library users pay nothing.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Store operation latency metric name.
pub const METRIC_STORE_LATENCY: &str = "store_operation_latency_ms";
/// Successful signups counter metric name.
pub const METRIC_SIGNUPS: &str = "signups_total";
/// Rejected duplicate-email signups counter metric name.
pub const METRIC_SIGNUP_CONFLICTS: &str = "signup_conflicts_total";
/// Successful logins counter metric name.
pub const METRIC_LOGINS: &str = "logins_total";
/// Failed logins counter metric name.
pub const METRIC_LOGIN_FAILURES: &str = "login_failures_total";
/// Lands created counter metric name.
pub const METRIC_LANDS_CREATED: &str = "lands_created_total";
/// Lands updated counter metric name.
pub const METRIC_LANDS_UPDATED: &str = "lands_updated_total";
/// Lands deleted counter metric name.
pub const METRIC_LANDS_DELETED: &str = "lands_deleted_total";
/// Forms stored counter metric name.
pub const METRIC_FORMS_STORED: &str = "forms_stored_total";

/// Install the Prometheus recorder and describe every metric.
/// Call this once at startup; the handle renders `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_STORE_LATENCY,
        "Document store operation latency in milliseconds"
    );

    describe_counter!(METRIC_SIGNUPS, "Total number of successful signups");
    describe_counter!(
        METRIC_SIGNUP_CONFLICTS,
        "Total number of signups rejected for a duplicate email"
    );
    describe_counter!(METRIC_LOGINS, "Total number of successful logins");
    describe_counter!(METRIC_LOGIN_FAILURES, "Total number of failed logins");
    describe_counter!(METRIC_LANDS_CREATED, "Total number of land listings created");
    describe_counter!(METRIC_LANDS_UPDATED, "Total number of land listings updated");
    describe_counter!(METRIC_LANDS_DELETED, "Total number of land listings deleted");
    describe_counter!(METRIC_FORMS_STORED, "Total number of form submissions stored");

    debug!("Metrics initialized");
    Ok(handle)
}

/// Record latency of a store operation.
pub fn record_store_latency(operation: &'static str, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_STORE_LATENCY, "op" => operation).record(latency_ms);
}

/// Increment a counter by one.
pub fn increment(name: &'static str) {
    counter!(name).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        record_store_latency("find", Instant::now());
        increment(METRIC_SIGNUPS);
    }

    #[test]
    fn metric_names_are_unique() {
        let names = [
            METRIC_STORE_LATENCY,
            METRIC_SIGNUPS,
            METRIC_SIGNUP_CONFLICTS,
            METRIC_LOGINS,
            METRIC_LOGIN_FAILURES,
            METRIC_LANDS_CREATED,
            METRIC_LANDS_UPDATED,
            METRIC_LANDS_DELETED,
            METRIC_FORMS_STORED,
        ];
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
