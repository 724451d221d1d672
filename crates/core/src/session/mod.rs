//! Visitor session entries and the mock-account auth state machine.
//!
//! # Persisted layout
//!
//! A flat map of string keys to string values:
//!
//! ```text
//! isLoggedIn   "true" or absent
//! userEmail    cached profile fields, written on login
//! userName
//! userPhone
//! userGender
//! userBirth
//! ```
//!
//! Keys are independent; there is no transaction across them. All reads and
//! writes go through [`SessionContext`] so the key set lives in one place.
//!
//! # States
//!
//! ```text
//! LoggedOut --login(mock pair)--> LoggedIn --logout / delete_account--> LoggedOut
//!                                  LoggedIn --update_profile--> LoggedIn
//! ```
//!
//! Logout removes only `isLoggedIn`; the cached profile survives and is what
//! password recovery checks against, edits included. Account deletion clears
//! every key.

pub mod account;
pub mod error;
pub mod forms;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use account::{Gender, MOCK_ACCOUNT, MockAccount};
pub use error::AuthError;
pub use forms::{
    BIRTH_FORMAT, FindPasswordForm, LoginForm, ProfileForm, ResetPasswordForm, SignupFields,
    SignupForm,
};

/// Value stored under `isLoggedIn` while logged in.
pub const LOGGED_IN_VALUE: &str = "true";

/// The persisted session keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKey {
    IsLoggedIn,
    UserEmail,
    UserName,
    UserPhone,
    UserGender,
    UserBirth,
}

impl SessionKey {
    pub const ALL: [Self; 6] = [
        Self::IsLoggedIn,
        Self::UserEmail,
        Self::UserName,
        Self::UserPhone,
        Self::UserGender,
        Self::UserBirth,
    ];

    /// The persisted key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsLoggedIn => "isLoggedIn",
            Self::UserEmail => "userEmail",
            Self::UserName => "userName",
            Self::UserPhone => "userPhone",
            Self::UserGender => "userGender",
            Self::UserBirth => "userBirth",
        }
    }
}

/// Key-value backend for session entries.
pub trait SessionStorage {
    fn get(&self, key: SessionKey) -> Option<&str>;

    fn set(&mut self, key: SessionKey, value: String);

    /// Remove a key, returning its previous value.
    fn remove(&mut self, key: SessionKey) -> Option<String>;

    /// Remove every key.
    fn clear(&mut self) {
        for key in SessionKey::ALL {
            self.remove(key);
        }
    }
}

/// In-memory session entries.
///
/// The storefront loads one of these from the visitor's session at the start
/// of a request and writes it back afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionEntries(BTreeMap<SessionKey, String>);

impl SessionEntries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Present entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (SessionKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl SessionStorage for SessionEntries {
    fn get(&self, key: SessionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    fn set(&mut self, key: SessionKey, value: String) {
        self.0.insert(key, value);
    }

    fn remove(&mut self, key: SessionKey) -> Option<String> {
        self.0.remove(&key)
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(SessionKey, String)> for SessionEntries {
    fn from_iter<I: IntoIterator<Item = (SessionKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Authentication state derived from the `isLoggedIn` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl AuthState {
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

/// Cached profile fields, as read back by the account screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth: Option<String>,
}

impl Profile {
    /// Name to greet the visitor with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("고객")
    }

    #[must_use]
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("정보 없음")
    }

    /// Localized gender label; unknown stored values are shown verbatim.
    #[must_use]
    pub fn display_gender(&self) -> Option<&str> {
        self.gender.as_deref().map(|g| match Gender::parse(g) {
            Some(gender) => gender.label(),
            None => g,
        })
    }
}

/// The one place session entries are read and written.
#[derive(Debug, Clone, Default)]
pub struct SessionContext<S> {
    storage: S,
}

impl<S: SessionStorage> SessionContext<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.storage.get(SessionKey::IsLoggedIn) == Some(LOGGED_IN_VALUE) {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    /// Cached profile, independent of the login state.
    #[must_use]
    pub fn profile(&self) -> Profile {
        let read = |key: SessionKey| self.storage.get(key).map(str::to_owned);
        Profile {
            email: read(SessionKey::UserEmail),
            name: read(SessionKey::UserName),
            phone: read(SessionKey::UserPhone),
            gender: read(SessionKey::UserGender),
            birth: read(SessionKey::UserBirth),
        }
    }

    /// LoggedOut/LoggedIn -> LoggedIn on the mock credential pair.
    ///
    /// On success all six keys are written. On failure nothing is written
    /// and the state is unchanged; attempts are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the pair does not match.
    pub fn login(&mut self, form: &LoginForm) -> Result<(), AuthError> {
        if !MOCK_ACCOUNT.authenticate(form) {
            tracing::warn!("Login rejected: credentials do not match");
            return Err(AuthError::InvalidCredentials);
        }

        let account = &MOCK_ACCOUNT;
        self.storage
            .set(SessionKey::IsLoggedIn, LOGGED_IN_VALUE.to_owned());
        self.storage
            .set(SessionKey::UserEmail, account.email.to_owned());
        self.storage
            .set(SessionKey::UserName, account.name.to_owned());
        self.storage
            .set(SessionKey::UserPhone, account.phone.to_owned());
        self.storage
            .set(SessionKey::UserGender, account.gender.as_str().to_owned());
        self.storage
            .set(SessionKey::UserBirth, account.birth.to_owned());

        tracing::info!(email = account.email, "Login succeeded");
        Ok(())
    }

    /// LoggedIn -> LoggedOut. Only `isLoggedIn` is removed.
    pub fn logout(&mut self) {
        self.storage.remove(SessionKey::IsLoggedIn);
        tracing::info!("Logged out");
    }

    /// Rewrite the editable profile entries: `userName`, `userPhone`,
    /// `userGender` and `userBirth`.
    ///
    /// `userEmail` and `isLoggedIn` are untouched. A blank optional field
    /// removes its entry. Callers gate this on the LoggedIn state.
    pub fn update_profile(&mut self, form: &ProfileForm) {
        self.storage.set(SessionKey::UserName, form.name().to_owned());
        self.set_or_remove(SessionKey::UserPhone, form.phone().map(str::to_owned));
        self.set_or_remove(
            SessionKey::UserGender,
            form.gender().map(|g| g.as_str().to_owned()),
        );
        self.set_or_remove(
            SessionKey::UserBirth,
            form.birth().map(|d| d.format(BIRTH_FORMAT).to_string()),
        );
        tracing::info!("Profile updated");
    }

    fn set_or_remove(&mut self, key: SessionKey, value: Option<String>) {
        match value {
            Some(value) => self.storage.set(key, value),
            None => {
                self.storage.remove(key);
            }
        }
    }

    /// Any state -> LoggedOut with every key cleared.
    pub fn delete_account(&mut self) {
        self.storage.clear();
        tracing::info!("Account deleted, session entries cleared");
    }

    /// Check a recovery request against the cached `userName`/`userEmail`.
    ///
    /// Recovery only works after a login has cached a profile on this
    /// session; there is no separate credential store to consult.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoAccount`] if no profile is cached and
    /// [`AuthError::RecoveryMismatch`] if either value differs.
    pub fn verify_recovery(&self, form: &FindPasswordForm) -> Result<(), AuthError> {
        let (Some(name), Some(email)) = (
            self.storage.get(SessionKey::UserName),
            self.storage.get(SessionKey::UserEmail),
        ) else {
            tracing::warn!("Password recovery without a cached profile");
            return Err(AuthError::NoAccount);
        };

        if form.name() != name || form.email() != email {
            tracing::warn!("Password recovery details do not match cached profile");
            return Err(AuthError::RecoveryMismatch);
        }

        Ok(())
    }
}

/// Accept a new password.
///
/// Nothing is persisted: there is no credential store behind the mock
/// account, so its password stays the same and the visitor is sent back to
/// login.
pub fn reset_password(_form: &ResetPasswordForm) {
    tracing::info!("Password reset accepted; mock account unchanged");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn logged_in() -> SessionContext<SessionEntries> {
        let mut ctx = SessionContext::new(SessionEntries::new());
        ctx.login(&LoginForm::new("test@test.com", "password1234").unwrap())
            .unwrap();
        ctx
    }

    #[test]
    fn test_initial_state_is_logged_out() {
        let ctx = SessionContext::new(SessionEntries::new());
        assert_eq!(ctx.state(), AuthState::LoggedOut);
        assert_eq!(ctx.profile(), Profile::default());
    }

    #[test]
    fn test_login_writes_all_keys() {
        let ctx = logged_in();
        assert_eq!(ctx.state(), AuthState::LoggedIn);

        let entries = ctx.into_inner();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries.get(SessionKey::IsLoggedIn), Some("true"));
        assert_eq!(entries.get(SessionKey::UserEmail), Some("test@test.com"));
        assert_eq!(entries.get(SessionKey::UserName), Some("홍길동"));
        assert_eq!(entries.get(SessionKey::UserPhone), Some("010-1234-5678"));
        assert_eq!(entries.get(SessionKey::UserGender), Some("male"));
        assert_eq!(entries.get(SessionKey::UserBirth), Some("1999-05-20"));
    }

    #[test]
    fn test_failed_login_writes_nothing() {
        let mut ctx = SessionContext::new(SessionEntries::new());
        let form = LoginForm::new("test@test.com", "wrong-password").unwrap();

        assert_eq!(ctx.login(&form), Err(AuthError::InvalidCredentials));
        assert_eq!(ctx.state(), AuthState::LoggedOut);
        assert!(ctx.storage().is_empty());
    }

    #[test]
    fn test_repeated_failures_do_not_lock_out() {
        let mut ctx = SessionContext::new(SessionEntries::new());
        let bad = LoginForm::new("test@test.com", "nope").unwrap();
        for _ in 0..10 {
            assert!(ctx.login(&bad).is_err());
        }
        let good = LoginForm::new("test@test.com", "password1234").unwrap();
        assert!(ctx.login(&good).is_ok());
    }

    #[test]
    fn test_logout_removes_only_logged_in_flag() {
        let mut ctx = logged_in();
        ctx.logout();

        assert_eq!(ctx.state(), AuthState::LoggedOut);
        assert_eq!(ctx.storage().get(SessionKey::IsLoggedIn), None);
        assert_eq!(ctx.profile().name.as_deref(), Some("홍길동"));
        assert_eq!(ctx.storage().len(), 5);
    }

    #[test]
    fn test_delete_account_clears_everything() {
        let mut ctx = logged_in();
        ctx.delete_account();

        assert_eq!(ctx.state(), AuthState::LoggedOut);
        assert!(ctx.storage().is_empty());
    }

    #[test]
    fn test_only_exact_true_means_logged_in() {
        let entries: SessionEntries = [(SessionKey::IsLoggedIn, "TRUE".to_string())]
            .into_iter()
            .collect();
        assert_eq!(SessionContext::new(entries).state(), AuthState::LoggedOut);
    }

    #[test]
    fn test_recovery_without_cached_profile() {
        let ctx = SessionContext::new(SessionEntries::new());
        let form = FindPasswordForm::new("홍길동", "test@test.com").unwrap();
        assert_eq!(ctx.verify_recovery(&form), Err(AuthError::NoAccount));
    }

    #[test]
    fn test_recovery_after_logout_uses_cached_profile() {
        let mut ctx = logged_in();
        ctx.logout();

        let ok = FindPasswordForm::new("홍길동", "test@test.com").unwrap();
        assert_eq!(ctx.verify_recovery(&ok), Ok(()));

        let wrong_name = FindPasswordForm::new("홍길순", "test@test.com").unwrap();
        assert_eq!(
            ctx.verify_recovery(&wrong_name),
            Err(AuthError::RecoveryMismatch)
        );

        let wrong_email = FindPasswordForm::new("홍길동", "test@test.co").unwrap();
        assert_eq!(
            ctx.verify_recovery(&wrong_email),
            Err(AuthError::RecoveryMismatch)
        );
    }

    #[test]
    fn test_recovery_after_delete_has_no_account() {
        let mut ctx = logged_in();
        ctx.delete_account();
        let form = FindPasswordForm::new("홍길동", "test@test.com").unwrap();
        assert_eq!(ctx.verify_recovery(&form), Err(AuthError::NoAccount));
    }

    #[test]
    fn test_update_profile_rewrites_editable_keys() {
        let mut ctx = logged_in();
        let form = ProfileForm::new("홍길순", "", "female", "2001-03-14").unwrap();
        ctx.update_profile(&form);

        assert_eq!(ctx.state(), AuthState::LoggedIn);
        let profile = ctx.profile();
        assert_eq!(profile.name.as_deref(), Some("홍길순"));
        assert_eq!(profile.email.as_deref(), Some("test@test.com"));
        assert_eq!(profile.phone, None);
        assert_eq!(profile.gender.as_deref(), Some("female"));
        assert_eq!(profile.birth.as_deref(), Some("2001-03-14"));
        assert_eq!(ctx.storage().len(), 5);
    }

    #[test]
    fn test_recovery_checks_edited_name() {
        let mut ctx = logged_in();
        ctx.update_profile(&ProfileForm::new("홍길순", "", "", "").unwrap());
        ctx.logout();

        let old = FindPasswordForm::new("홍길동", "test@test.com").unwrap();
        assert_eq!(ctx.verify_recovery(&old), Err(AuthError::RecoveryMismatch));
        let edited = FindPasswordForm::new("홍길순", "test@test.com").unwrap();
        assert_eq!(ctx.verify_recovery(&edited), Ok(()));
    }

    #[test]
    fn test_login_restores_mock_profile_after_edit() {
        let mut ctx = logged_in();
        ctx.update_profile(&ProfileForm::new("홍길순", "", "", "").unwrap());
        ctx.login(&LoginForm::new("test@test.com", "password1234").unwrap())
            .unwrap();
        assert_eq!(ctx.profile().name.as_deref(), Some("홍길동"));
    }

    #[test]
    fn test_reset_password_leaves_mock_account_unchanged() {
        let form = ResetPasswordForm::new("brand-new", "brand-new").unwrap();
        reset_password(&form);

        let mut ctx = SessionContext::new(SessionEntries::new());
        let old = LoginForm::new("test@test.com", "password1234").unwrap();
        assert!(ctx.login(&old).is_ok());

        let mut ctx = SessionContext::new(SessionEntries::new());
        let new = LoginForm::new("test@test.com", "brand-new").unwrap();
        assert_eq!(ctx.login(&new), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_profile_display_fallbacks() {
        let profile = Profile::default();
        assert_eq!(profile.display_name(), "고객");
        assert_eq!(profile.display_email(), "정보 없음");
        assert_eq!(profile.display_gender(), None);

        assert_eq!(logged_in().profile().display_gender(), Some("남성"));
    }

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = SessionKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["isLoggedIn", "userEmail", "userName", "userPhone", "userGender", "userBirth"]
        );
        assert_eq!(
            serde_json::to_string(&SessionKey::UserBirth).unwrap(),
            "\"userBirth\""
        );
    }
}
