//! Integration tests for the AION storefront.
//!
//! Tests drive the full router in process: no server, no network. Each
//! [`TestClient`] owns its own router (and so its own in-memory session
//! store) and carries the session cookie between requests like a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aion-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use aion_storefront::config::StorefrontConfig;
use aion_storefront::middleware::session::SESSION_COOKIE_NAME;
use aion_storefront::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;
use tower_sessions::cookie::Cookie;

/// A browser-like client over an in-process storefront.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn is_redirect_to(&self, target: &str) -> bool {
        self.status.is_redirection() && self.location() == Some(target)
    }
}

impl TestClient {
    /// A fresh visitor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        Self {
            router: aion_storefront::app(AppState::new(config)),
            cookie: None,
        }
    }

    /// Whether the client currently holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Log in with the mock account and check the redirect.
    pub async fn login(&mut self) {
        let response = self
            .post_form(
                "/auth/login",
                &[("email", "test@test.com"), ("password", "password1234")],
            )
            .await;
        assert!(
            response.is_redirect_to("/?notice=welcome"),
            "login failed: {response:?}"
        );
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        self.store_cookie(&headers);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    fn store_cookie(&mut self, headers: &HeaderMap) {
        let cookies = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| Cookie::parse(value).ok());

        for cookie in cookies {
            if cookie.name() != SESSION_COOKIE_NAME {
                continue;
            }
            if cookie.max_age().is_some_and(|age| age.is_zero()) {
                self.cookie = None;
            } else {
                self.cookie = Some(cookie.stripped().to_string());
            }
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
