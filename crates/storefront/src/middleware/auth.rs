//! Visitor session extractors.
//!
//! [`Visitor`] loads the session entries for the current request into a
//! [`SessionContext`]; handlers run transitions on it and call
//! [`Visitor::commit`] to write the result back. [`RequireLogin`] additionally
//! redirects logged-out visitors to the login screen.

use aion_core::session::{AuthState, Profile, SessionContext, SessionEntries};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::session::{commit_entries, load_entries, stash_signup_name, take_signup_name};
use crate::error::AppError;

/// The current visitor and their session entries.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut visitor: Visitor) -> Result<Response> {
///     visitor.context_mut().logout();
///     visitor.commit().await?;
///     Ok(Redirect::to("/").into_response())
/// }
/// ```
pub struct Visitor {
    session: Session,
    context: SessionContext<SessionEntries>,
}

impl Visitor {
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.context.state()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in()
    }

    #[must_use]
    pub fn profile(&self) -> Profile {
        self.context.profile()
    }

    pub const fn context(&self) -> &SessionContext<SessionEntries> {
        &self.context
    }

    pub const fn context_mut(&mut self) -> &mut SessionContext<SessionEntries> {
        &mut self.context
    }

    /// Persist the entries back to the visitor's session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn commit(&self) -> Result<(), AppError> {
        commit_entries(&self.session, self.context.storage()).await?;
        Ok(())
    }

    /// Remember the new member's name for the login screen's greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn stash_signup_name(&self, name: &str) -> Result<(), AppError> {
        stash_signup_name(&self.session, name).await?;
        Ok(())
    }

    /// Take the stashed signup name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn take_signup_name(&self) -> Result<Option<String>, AppError> {
        Ok(take_signup_name(&self.session).await?)
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let entries = load_entries(&session).await?;

        Ok(Self {
            session,
            context: SessionContext::new(entries),
        })
    }
}

/// Extractor that requires the LoggedIn state.
///
/// If the visitor is not logged in, returns a redirect to the login page.
pub struct RequireLogin(pub Visitor);

/// Error returned when login is required.
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// The session could not be loaded.
    Failed(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let visitor = Visitor::from_request_parts(parts, state)
            .await
            .map_err(AuthRejection::Failed)?;

        if !visitor.is_logged_in() {
            tracing::debug!(path = %parts.uri.path(), "Login required, redirecting");
            return Err(AuthRejection::RedirectToLogin);
        }

        Ok(Self(visitor))
    }
}
