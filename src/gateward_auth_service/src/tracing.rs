use std::time::Duration;

use axum::{extract::Request, response::Response};
use tracing::{Level, Span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Initialize the tracing subscriber. `RUST_LOG` controls the filter,
/// defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

pub fn make_span_with_request_id(request: &Request) -> Span {
    let request_id = Uuid::new_v4();
    tracing::span!(
        Level::INFO,
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

pub fn on_request(_request: &Request, _span: &Span) {
    tracing::event!(Level::INFO, "started processing request");
}

pub fn on_response(response: &Response, latency: Duration, _span: &Span) {
    tracing::event!(
        Level::INFO,
        status = response.status().as_u16(),
        latency = ?latency,
        "finished processing request"
    );
}
