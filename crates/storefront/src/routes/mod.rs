//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, featured, about, newsletter)
//! GET  /health                 - Health check
//!
//! # Recommendation
//! GET  /recommend              - Filter/sort the catalog
//!      ?q=&tags=a,b&sort=      - Current state
//!      &add_tag= &remove_tag= &theme=  - Edits (redirect to canonical URL)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/signup            - Signup page
//! POST /auth/signup            - Signup action
//! GET  /auth/find-password     - Password recovery page
//! POST /auth/find-password     - Verify recovery details
//! GET  /auth/reset-password    - New password page
//! POST /auth/reset-password    - Accept new password
//! POST /auth/logout            - Logout action
//!
//! # Account (requires login)
//! GET  /account                - Account overview
//! GET  /account/edit           - Profile edit form
//! POST /account/edit           - Save profile
//! GET  /account/delete         - Deletion confirmation
//! POST /account/delete         - Delete account
//! ```

pub mod account;
pub mod auth;
pub mod home;
pub mod recommend;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route(
            "/find-password",
            get(auth::find_password_page).post(auth::find_password),
        )
        .route(
            "/reset-password",
            get(auth::reset_password_page).post(auth::reset_password),
        )
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/edit", get(account::edit_page).post(account::edit))
        .route("/delete", get(account::delete_page).post(account::delete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/recommend", get(recommend::index))
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .fallback(not_found)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
