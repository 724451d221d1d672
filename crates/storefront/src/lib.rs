//! AION storefront library.
//!
//! Server-rendered screens for the AION perfume store: the home page, the
//! recommendation page backed by the catalog pipeline, and the mock-account
//! auth flows backed by per-visitor session entries.
//!
//! The binary in `main.rs` adds Sentry and serves [`app`]; tests drive [`app`]
//! in process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header::CACHE_CONTROL},
};
use tower_http::{services::ServeDir, set_header::SetResponseHeader, trace::TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Cache policy for static assets; the stylesheet path is content-hashed.
const STATIC_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Build the storefront router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_files = SetResponseHeader::if_not_present(
        ServeDir::new(&state.config().static_dir),
        CACHE_CONTROL,
        HeaderValue::from_static(STATIC_CACHE_CONTROL),
    );

    routes::routes()
        .nest_service("/static", static_files)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Span for one request; `request_id` is filled in by the request-ID middleware.
fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
