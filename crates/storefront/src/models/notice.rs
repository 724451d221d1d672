//! One-shot notices shown after a redirect.
//!
//! A notice code travels in the query string of the redirect target
//! (`?notice=signed-out`) and is rendered once as a banner. The signup
//! greeting also needs the new member's name; that comes from a one-shot
//! session entry, never from the URL, so a crafted link cannot put its own
//! text in the banner.

use serde::Deserialize;

const SIGNED_UP: &str = "signed-up";

/// Query parameters carrying a notice.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// Whether this is the post-signup notice, which needs the stashed name.
    #[must_use]
    pub fn is_signed_up(&self) -> bool {
        self.notice.as_deref() == Some(SIGNED_UP)
    }
}

/// A completed action to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    SignedOut,
    AccountDeleted,
    PasswordReset,
    ProfileUpdated,
    SignedUp { name: String },
}

impl Notice {
    /// Parse a notice from the query string; unknown codes are ignored.
    ///
    /// `signed-up` resolves only when `signup_name` holds the name stashed
    /// by the signup handler.
    #[must_use]
    pub fn from_query(query: &NoticeQuery, signup_name: Option<String>) -> Option<Self> {
        let notice = match query.notice.as_deref()? {
            "welcome" => Self::Welcome,
            "signed-out" => Self::SignedOut,
            "account-deleted" => Self::AccountDeleted,
            "password-reset" => Self::PasswordReset,
            "profile-updated" => Self::ProfileUpdated,
            SIGNED_UP => Self::SignedUp { name: signup_name? },
            _ => return None,
        };
        Some(notice)
    }

    /// Redirect target that will display this notice on `path`.
    #[must_use]
    pub fn redirect_to(&self, path: &str) -> String {
        format!("{path}?notice={}", self.code())
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::SignedOut => "signed-out",
            Self::AccountDeleted => "account-deleted",
            Self::PasswordReset => "password-reset",
            Self::ProfileUpdated => "profile-updated",
            Self::SignedUp { .. } => SIGNED_UP,
        }
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Welcome => "환영합니다!".to_string(),
            Self::SignedOut => "로그아웃 되었습니다.".to_string(),
            Self::AccountDeleted => "회원 탈퇴가 완료되었습니다.".to_string(),
            Self::PasswordReset => "비밀번호가 변경되었습니다. 다시 로그인해주세요.".to_string(),
            Self::ProfileUpdated => "회원 정보가 수정되었습니다.".to_string(),
            Self::SignedUp { name } => format!("{name}님, 가입을 축하합니다!"),
        }
    }
}

/// Resolve a notice that needs no session data into a rendered message.
#[must_use]
pub fn notice_message(query: &NoticeQuery) -> Option<String> {
    Notice::from_query(query, None).map(|notice| notice.message())
}
