//! Metrics collection.
//!
//! # Metrics
//! - `httplink_requests_total` (counter): requests by kind and outcome
//! - `httplink_address_failures_total` (counter): failed attempts by address
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Exposition (Prometheus or otherwise) belongs to the host

/// Record the outcome of one `request` call.
pub fn record_request(kind: &str, success: bool) {
    let outcome = if success { "success" } else { "error" };
    metrics::counter!(
        "httplink_requests_total",
        "kind" => kind.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one failed attempt against `address`.
pub fn record_address_failure(address: &str) {
    metrics::counter!("httplink_address_failures_total", "address" => address.to_string())
        .increment(1);
}
