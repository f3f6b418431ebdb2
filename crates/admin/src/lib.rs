//! Identity Admin library.
//!
//! Administrative console for a hosted identity provider: five routes, each
//! relaying exactly one provider operation (create, lookup, list, update,
//! delete) and rendering the result as server-side HTML.
//!
//! The crate is a library so the full router can be mounted behind any host
//! adapter (the long-lived listener in the binary, or a per-invocation bridge
//! in a serverless runtime) and driven directly in tests.
//!
//! # Security
//!
//! The service credential grants full user management on the provider
//! project. Deploy behind trusted network access only; the console itself
//! carries no authentication.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod provider;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the complete application as a single routable service.
///
/// This is the seam for host adapters: everything except the listener lives
/// behind the returned `Router`.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not call the provider.
async fn health() -> &'static str {
    "ok"
}
