//! Validation errors for the auth screens.
//!
//! Every variant's `Display` output is the message shown to the visitor.

use thiserror::Error;

use crate::types::EmailError;

/// A rejected auth-screen submission.
///
/// None of these are fatal: the screen is shown again with the message and
/// the visitor resubmits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A required signup or login field was left blank.
    #[error("{0}을(를) 입력해주세요.")]
    MissingField(&'static str),

    #[error("이름과 이메일을 모두 입력해주세요.")]
    MissingRecoveryFields,

    #[error("비밀번호를 모두 입력해주세요.")]
    MissingPasswords,

    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,

    /// Email/password pair does not match the mock account.
    #[error("이메일 또는 비밀번호가 일치하지 않습니다.")]
    InvalidCredentials,

    /// Recovery was attempted before any profile was cached.
    #[error("가입된 계정이 없습니다.")]
    NoAccount,

    /// Recovery name/email differ from the cached profile.
    #[error("가입 시 입력한 정보와 일치하지 않습니다.")]
    RecoveryMismatch,

    #[error("올바른 이메일 주소를 입력해주세요.")]
    InvalidEmail(#[from] EmailError),

    #[error("성별을 다시 선택해주세요.")]
    InvalidGender,

    #[error("올바른 생년월일을 선택해주세요.")]
    InvalidBirthDate,

    #[error("필수 약관에 동의해주세요.")]
    TermsNotAccepted,
}
