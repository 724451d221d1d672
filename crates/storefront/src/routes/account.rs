//! Account route handlers.
//!
//! These routes require the LoggedIn state.

use std::fmt;

use aion_core::session::{Profile, ProfileForm};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user};
use crate::filters;
use crate::middleware::RequireLogin;
use crate::models::{Notice, NoticeQuery, notice_message};

/// Profile-edit form data.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ProfileEditRequest {
    pub name: String,
    pub phone: String,
    pub gender: String,
    /// `YYYY-MM-DD` from a date input.
    pub birth: String,
}

impl fmt::Debug for ProfileEditRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileEditRequest")
            .field("gender", &self.gender)
            .finish_non_exhaustive()
    }
}

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub logged_in: bool,
    pub profile: Profile,
    pub notice: Option<String>,
}

/// Profile-edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/edit.html")]
pub struct ProfileEditTemplate {
    pub logged_in: bool,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub gender: String,
    pub birth: String,
    pub error: Option<String>,
}

impl ProfileEditTemplate {
    fn new(email: Option<String>, request: ProfileEditRequest, error: Option<String>) -> Self {
        Self {
            logged_in: true,
            email: email.unwrap_or_default(),
            name: request.name,
            phone: request.phone,
            gender: request.gender,
            birth: request.birth,
            error,
        }
    }
}

/// Account deletion confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "account/delete.html")]
pub struct DeleteAccountTemplate {
    pub logged_in: bool,
    pub name: String,
}

/// Display the account overview with the cached profile.
#[instrument(skip_all)]
pub async fn index(
    RequireLogin(visitor): RequireLogin,
    Query(query): Query<NoticeQuery>,
) -> impl IntoResponse {
    AccountIndexTemplate {
        logged_in: true,
        profile: visitor.profile(),
        notice: notice_message(&query),
    }
}

/// Display the profile-edit form filled with the cached profile.
#[instrument(skip_all)]
pub async fn edit_page(RequireLogin(visitor): RequireLogin) -> impl IntoResponse {
    let profile = visitor.profile();
    let request = ProfileEditRequest {
        name: profile.name.unwrap_or_default(),
        phone: profile.phone.unwrap_or_default(),
        gender: profile.gender.unwrap_or_default(),
        birth: profile.birth.unwrap_or_default(),
    };
    ProfileEditTemplate::new(profile.email, request, None)
}

/// Save the edited profile, or show the form again with the error.
#[instrument(skip_all)]
pub async fn edit(
    RequireLogin(mut visitor): RequireLogin,
    Form(form): Form<ProfileEditRequest>,
) -> Result<Response> {
    match ProfileForm::new(&form.name, &form.phone, &form.gender, &form.birth) {
        Ok(profile) => {
            visitor.context_mut().update_profile(&profile);
            visitor.commit().await?;
            Ok(Redirect::to(&Notice::ProfileUpdated.redirect_to("/account")).into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Profile edit rejected");
            Ok(
                ProfileEditTemplate::new(visitor.profile().email, form, Some(e.to_string()))
                    .into_response(),
            )
        }
    }
}

/// Ask for confirmation before deleting the account.
#[instrument(skip_all)]
pub async fn delete_page(RequireLogin(visitor): RequireLogin) -> impl IntoResponse {
    DeleteAccountTemplate {
        logged_in: true,
        name: visitor.profile().display_name().to_string(),
    }
}

/// Delete the account: every session entry is cleared.
#[instrument(skip_all)]
pub async fn delete(RequireLogin(mut visitor): RequireLogin) -> Result<Response> {
    visitor.context_mut().delete_account();
    visitor.commit().await?;
    clear_sentry_user();
    Ok(Redirect::to(&Notice::AccountDeleted.redirect_to("/")).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_template_keeps_submitted_values() {
        let request = ProfileEditRequest {
            name: "홍길순".to_string(),
            phone: "010-0000-1111".to_string(),
            gender: "female".to_string(),
            birth: "1999-02-30".to_string(),
        };
        let page = ProfileEditTemplate::new(
            Some("test@test.com".to_string()),
            request,
            Some("올바른 생년월일을 선택해주세요.".to_string()),
        );
        assert_eq!(page.email, "test@test.com");
        assert_eq!(page.name, "홍길순");
        assert_eq!(page.birth, "1999-02-30");
        assert!(page.error.is_some());
    }

    #[test]
    fn test_edit_request_debug_hides_personal_fields() {
        let request = ProfileEditRequest {
            name: "홍길순".to_string(),
            phone: "010-0000-1111".to_string(),
            ..ProfileEditRequest::default()
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("홍길순"));
        assert!(!debug.contains("010-0000-1111"));
    }
}
