//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (installed in `main`)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fills the span field, Sentry tag and response header)
//! 4. Session layer (tower-sessions with the in-memory store)
//! 5. Security headers (CSP etc.)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{AuthRejection, RequireLogin, Visitor};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
