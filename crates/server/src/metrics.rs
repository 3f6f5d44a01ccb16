use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static ENQUEUED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "volunteer_queue_enqueued_total",
        "Total volunteers added to the queue"
    )
    .expect("register enqueued_total")
});

pub static ASSIGNED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "volunteer_queue_assigned_total",
        "Total volunteers moved from the queue to the assigned list"
    )
    .expect("register assigned_total")
});

pub static REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "volunteer_queue_rejected_total",
        "Total requests rejected with a client error"
    )
    .expect("register rejected_total")
});

/// Force registration so the counters show up before their first increment.
pub fn init() {
    Lazy::force(&ENQUEUED_TOTAL);
    Lazy::force(&ASSIGNED_TOTAL);
    Lazy::force(&REJECTED_TOTAL);
}

pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        return (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, "text/plain".to_string())], e.to_string());
    }
    let body = String::from_utf8_lossy(&buf).into_owned();
    (StatusCode::OK, [(header::CONTENT_TYPE, encoder.format_type().to_string())], body)
}
