//! Authentication route handlers.
//!
//! Login, signup, password recovery and logout against the mock account.
//! A failed submission re-renders the same screen with the error message and
//! the non-secret inputs; passwords are never echoed back.

use std::fmt;

use aion_core::session::{
    self, FindPasswordForm, LoginForm, ResetPasswordForm, SignupFields, SignupForm,
};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Datelike;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Notice, NoticeQuery, SelectOption};

/// Number of years offered in the birth-year select.
const BIRTH_YEAR_SPAN: i32 = 100;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Signup form data.
///
/// Checkboxes are present only when ticked.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub phone: String,
    pub gender: String,
    pub birth_year: String,
    pub birth_month: String,
    pub birth_day: String,
    pub agree_terms: Option<String>,
    pub agree_marketing: Option<String>,
}

impl SignupRequest {
    fn fields(&self) -> SignupFields<'_> {
        SignupFields {
            name: &self.name,
            email: &self.email,
            password: &self.password,
            password_confirm: &self.password_confirm,
            phone: &self.phone,
            gender: &self.gender,
            birth_year: &self.birth_year,
            birth_month: &self.birth_month,
            birth_day: &self.birth_day,
            agree_terms: self.agree_terms.is_some(),
            agree_marketing: self.agree_marketing.is_some(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Find-password form data.
#[derive(Debug, Deserialize)]
pub struct FindPasswordRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Reset-password form data.
#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetPasswordRequest { .. }")
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub logged_in: bool,
    pub email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub years: Vec<SelectOption>,
    pub months: Vec<SelectOption>,
    pub days: Vec<SelectOption>,
    pub agree_terms: bool,
    pub agree_marketing: bool,
}

impl SignupTemplate {
    fn new(logged_in: bool, request: &SignupRequest, error: Option<String>) -> Self {
        let this_year = chrono::Utc::now().year();
        let years = (this_year - BIRTH_YEAR_SPAN + 1..=this_year)
            .rev()
            .map(|y| SelectOption::new(y.to_string(), y.to_string(), &request.birth_year))
            .collect();
        let months = (1..=12)
            .map(|m| SelectOption::new(m.to_string(), m.to_string(), &request.birth_month))
            .collect();
        let days = (1..=31)
            .map(|d| SelectOption::new(d.to_string(), d.to_string(), &request.birth_day))
            .collect();

        Self {
            logged_in,
            error,
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            gender: request.gender.clone(),
            years,
            months,
            days,
            agree_terms: request.agree_terms.is_some(),
            agree_marketing: request.agree_marketing.is_some(),
        }
    }
}

/// Find-password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/find_password.html")]
pub struct FindPasswordTemplate {
    pub logged_in: bool,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

/// Reset-password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/reset_password.html")]
pub struct ResetPasswordTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// After a signup the greeting's name is taken from the session, so it is
/// shown once.
#[instrument(skip_all)]
pub async fn login_page(
    visitor: Visitor,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let signup_name = if query.is_signed_up() {
        visitor.take_signup_name().await?
    } else {
        None
    };

    Ok(LoginTemplate {
        logged_in: visitor.is_logged_in(),
        email: String::new(),
        error: None,
        notice: Notice::from_query(&query, signup_name).map(|notice| notice.message()),
    })
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(mut visitor: Visitor, Form(form): Form<LoginRequest>) -> Result<Response> {
    let outcome = LoginForm::new(&form.email, &form.password)
        .and_then(|login| visitor.context_mut().login(&login));

    match outcome {
        Ok(()) => {
            visitor.commit().await?;
            set_sentry_user(&form.email);
            add_breadcrumb("auth", "Logged in", None);
            Ok(Redirect::to(&Notice::Welcome.redirect_to("/")).into_response())
        }
        Err(e) => Ok(LoginTemplate {
            logged_in: visitor.is_logged_in(),
            email: form.email,
            error: Some(e.to_string()),
            notice: None,
        }
        .into_response()),
    }
}

/// Handle logout.
///
/// Only the logged-in flag is cleared; the cached profile stays on the
/// session.
#[instrument(skip_all)]
pub async fn logout(mut visitor: Visitor) -> Result<Response> {
    visitor.context_mut().logout();
    visitor.commit().await?;
    clear_sentry_user();
    Ok(Redirect::to(&Notice::SignedOut.redirect_to("/")).into_response())
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
#[instrument(skip_all)]
pub async fn signup_page(visitor: Visitor) -> impl IntoResponse {
    SignupTemplate::new(visitor.is_logged_in(), &SignupRequest::default(), None)
}

/// Handle signup form submission.
///
/// A valid signup is acknowledged but not stored; the mock account remains
/// the only one that can log in. Only the name is kept, for the login
/// screen's one-time greeting.
#[instrument(skip_all)]
pub async fn signup(visitor: Visitor, Form(form): Form<SignupRequest>) -> Result<Response> {
    match SignupForm::validate(&form.fields()) {
        Ok(signup) => {
            tracing::info!(
                email = %signup.email,
                marketing = signup.agree_marketing,
                "Signup accepted (not persisted)"
            );
            visitor.stash_signup_name(&signup.name).await?;
            let notice = Notice::SignedUp { name: signup.name };
            Ok(Redirect::to(&notice.redirect_to("/auth/login")).into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Signup rejected");
            Ok(
                SignupTemplate::new(visitor.is_logged_in(), &form, Some(e.to_string()))
                    .into_response(),
            )
        }
    }
}

// =============================================================================
// Password Recovery Routes
// =============================================================================

/// Display the find-password page.
#[instrument(skip_all)]
pub async fn find_password_page(visitor: Visitor) -> impl IntoResponse {
    FindPasswordTemplate {
        logged_in: visitor.is_logged_in(),
        name: String::new(),
        email: String::new(),
        error: None,
    }
}

/// Check the recovery details against the cached profile.
#[instrument(skip_all)]
pub async fn find_password(visitor: Visitor, Form(form): Form<FindPasswordRequest>) -> Response {
    let outcome = FindPasswordForm::new(&form.name, &form.email)
        .and_then(|recovery| visitor.context().verify_recovery(&recovery));

    match outcome {
        Ok(()) => Redirect::to("/auth/reset-password").into_response(),
        Err(e) => FindPasswordTemplate {
            logged_in: visitor.is_logged_in(),
            name: form.name,
            email: form.email,
            error: Some(e.to_string()),
        }
        .into_response(),
    }
}

/// Display the reset-password page.
#[instrument(skip_all)]
pub async fn reset_password_page(visitor: Visitor) -> impl IntoResponse {
    ResetPasswordTemplate {
        logged_in: visitor.is_logged_in(),
        error: None,
    }
}

/// Handle reset-password form submission.
#[instrument(skip_all)]
pub async fn reset_password(visitor: Visitor, Form(form): Form<ResetPasswordRequest>) -> Response {
    match ResetPasswordForm::new(&form.password, &form.password_confirm) {
        Ok(reset) => {
            session::reset_password(&reset);
            Redirect::to(&Notice::PasswordReset.redirect_to("/auth/login")).into_response()
        }
        Err(e) => ResetPasswordTemplate {
            logged_in: visitor.is_logged_in(),
            error: Some(e.to_string()),
        }
        .into_response(),
    }
}
