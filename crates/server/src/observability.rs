use std::time::Duration;

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static SOAP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "enrollment_soap_requests_total",
        "SOAP requests handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register soap_requests_total")
});

pub static SOAP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "enrollment_soap_request_duration_seconds",
        "SOAP request duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register soap_request_duration")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fault,
    ClientFault,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Fault => "fault",
            Outcome::ClientFault => "client_fault",
        }
    }
}

pub fn record_soap_call(operation: &str, outcome: Outcome, elapsed: Duration) {
    SOAP_REQUESTS_TOTAL.with_label_values(&[operation, outcome.as_str()]).inc();
    SOAP_REQUEST_DURATION.with_label_values(&[operation]).observe(elapsed.as_secs_f64());
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
    (
        StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
