//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors; added in `main` when a DSN is configured)
//! 2. CORS (any origin; browser clients are served from other hosts)
//! 3. `TraceLayer` (request span with `request_id` field)
//! 4. Request ID (add unique ID to each request)

pub mod request_id;

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::Span;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

/// Builds the per-request tracing span.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    }
}

/// Request tracing layer whose span carries a `request_id` field.
#[must_use]
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http().make_span_with(RequestSpan)
}

/// Permissive CORS policy.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
