use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

use crate::types::Resource;

// Prometheus metrics (default registry)
pub static LIST_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "backoffice_list_requests_total",
        "Total list requests by resource and outcome",
        &["resource", "outcome"]
    )
    .expect("register list_requests_total")
});

pub static LIST_ROWS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "backoffice_list_rows_total",
        "Total rows returned by list requests",
        &["resource"]
    )
    .expect("register list_rows_total")
});

pub fn record_list_ok(resource: Resource, rows: usize) {
    LIST_REQUESTS_TOTAL
        .with_label_values(&[resource.as_str(), "ok"])
        .inc();
    LIST_ROWS_TOTAL
        .with_label_values(&[resource.as_str()])
        .inc_by(rows as u64);
}

pub fn record_list_error(resource: Resource) {
    LIST_REQUESTS_TOTAL
        .with_label_values(&[resource.as_str(), "error"])
        .inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
