//! Typed, validated records for the auth screens.
//!
//! Each constructor checks required fields before anything is compared or
//! stored, so a value of one of these types is always complete.

use chrono::NaiveDate;
use secrecy::SecretString;

use super::account::Gender;
use super::error::AuthError;
use crate::types::Email;

/// Login submission.
#[derive(Debug)]
pub struct LoginForm {
    email: String,
    password: SecretString,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] if either field is blank.
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("이메일"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("비밀번호"));
        }
        Ok(Self {
            email: email.to_owned(),
            password: SecretString::from(password.to_owned()),
        })
    }

    /// The email exactly as submitted.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Password-recovery ("find password") submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindPasswordForm {
    name: String,
    email: String,
}

impl FindPasswordForm {
    /// Blank checks trim, but the stored values are kept untrimmed for
    /// comparison.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRecoveryFields`] if either field is blank.
    pub fn new(name: &str, email: &str) -> Result<Self, AuthError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(AuthError::MissingRecoveryFields);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// New-password submission.
#[derive(Debug)]
pub struct ResetPasswordForm {
    password: SecretString,
}

impl ResetPasswordForm {
    /// # Errors
    ///
    /// Returns [`AuthError::MissingPasswords`] if either field is empty and
    /// [`AuthError::PasswordMismatch`] if they differ.
    pub fn new(password: &str, confirm: &str) -> Result<Self, AuthError> {
        if password.is_empty() || confirm.is_empty() {
            return Err(AuthError::MissingPasswords);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(Self {
            password: SecretString::from(password.to_owned()),
        })
    }

    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Profile-edit submission.
///
/// The email is not editable. Phone, gender and birth date are optional;
/// blank means "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    name: String,
    phone: Option<String>,
    gender: Option<Gender>,
    birth: Option<NaiveDate>,
}

impl ProfileForm {
    /// `birth` is an ISO-8601 date (`YYYY-MM-DD`), as a date input submits it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] for a blank name,
    /// [`AuthError::InvalidGender`] for an unknown gender and
    /// [`AuthError::InvalidBirthDate`] for a malformed or impossible date.
    pub fn new(name: &str, phone: &str, gender: &str, birth: &str) -> Result<Self, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("이름"));
        }
        let phone = Some(phone.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned);
        let gender = match gender.trim() {
            "" => None,
            other => Some(Gender::parse(other).ok_or(AuthError::InvalidGender)?),
        };
        let birth = match birth.trim() {
            "" => None,
            other => Some(
                NaiveDate::parse_from_str(other, BIRTH_FORMAT)
                    .map_err(|_| AuthError::InvalidBirthDate)?,
            ),
        };

        Ok(Self {
            name: name.to_owned(),
            phone,
            gender,
            birth,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub const fn gender(&self) -> Option<Gender> {
        self.gender
    }

    #[must_use]
    pub const fn birth(&self) -> Option<NaiveDate> {
        self.birth
    }
}

/// Stored and submitted birth-date format.
pub const BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Raw signup fields as submitted, before validation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignupFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
    pub phone: &'a str,
    pub gender: &'a str,
    pub birth_year: &'a str,
    pub birth_month: &'a str,
    pub birth_day: &'a str,
    pub agree_terms: bool,
    pub agree_marketing: bool,
}

/// A validated signup.
#[derive(Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: Email,
    pub password: SecretString,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub birth: Option<NaiveDate>,
    pub agree_marketing: bool,
}

impl SignupForm {
    /// Validate raw fields.
    ///
    /// Phone, gender and birth date are optional; a birth date is either
    /// fully blank or a real calendar date.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in form order.
    pub fn validate(fields: &SignupFields<'_>) -> Result<Self, AuthError> {
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("이름"));
        }
        if fields.email.trim().is_empty() {
            return Err(AuthError::MissingField("이메일"));
        }
        let email = Email::parse(fields.email.trim())?;
        if fields.password.is_empty() {
            return Err(AuthError::MissingField("비밀번호"));
        }
        if fields.password != fields.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let phone = Some(fields.phone.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned);
        let gender = match fields.gender.trim() {
            "" => None,
            other => Some(Gender::parse(other).ok_or(AuthError::InvalidGender)?),
        };
        let birth = parse_birth(fields.birth_year, fields.birth_month, fields.birth_day)?;

        if !fields.agree_terms {
            return Err(AuthError::TermsNotAccepted);
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            password: SecretString::from(fields.password.to_owned()),
            phone,
            gender,
            birth,
            agree_marketing: fields.agree_marketing,
        })
    }
}

fn parse_birth(year: &str, month: &str, day: &str) -> Result<Option<NaiveDate>, AuthError> {
    let parts = [year.trim(), month.trim(), day.trim()];
    if parts.iter().all(|p| p.is_empty()) {
        return Ok(None);
    }
    let [y, m, d] = parts;
    let year: i32 = y.parse().map_err(|_| AuthError::InvalidBirthDate)?;
    let month: u32 = m.parse().map_err(|_| AuthError::InvalidBirthDate)?;
    let day: u32 = d.parse().map_err(|_| AuthError::InvalidBirthDate)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or(AuthError::InvalidBirthDate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn signup() -> SignupFields<'static> {
        SignupFields {
            name: "김아테나",
            email: "athena@aion.kr",
            password: "olive-branch",
            password_confirm: "olive-branch",
            agree_terms: true,
            ..SignupFields::default()
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("", "password1234").unwrap_err(),
            AuthError::MissingField("이메일")
        );
        assert_eq!(
            LoginForm::new("test@test.com", "").unwrap_err(),
            AuthError::MissingField("비밀번호")
        );
    }

    #[test]
    fn test_login_keeps_email_verbatim() {
        let form = LoginForm::new(" test@test.com", "pw").unwrap();
        assert_eq!(form.email(), " test@test.com");
    }

    #[test]
    fn test_login_debug_hides_password() {
        let form = LoginForm::new("test@test.com", "password1234").unwrap();
        assert!(!format!("{form:?}").contains("password1234"));
    }

    #[test]
    fn test_find_password_requires_name_and_email() {
        assert_eq!(
            FindPasswordForm::new("  ", "test@test.com").unwrap_err(),
            AuthError::MissingRecoveryFields
        );
        assert_eq!(
            FindPasswordForm::new("홍길동", "").unwrap_err(),
            AuthError::MissingRecoveryFields
        );
        let form = FindPasswordForm::new("홍길동", "test@test.com").unwrap();
        assert_eq!(form.name(), "홍길동");
    }

    #[test]
    fn test_reset_password_checks() {
        assert_eq!(
            ResetPasswordForm::new("", "x").unwrap_err(),
            AuthError::MissingPasswords
        );
        assert_eq!(
            ResetPasswordForm::new("new-pass", "new-pas").unwrap_err(),
            AuthError::PasswordMismatch
        );
        let form = ResetPasswordForm::new("new-pass", "new-pass").unwrap();
        assert_eq!(form.password().expose_secret(), "new-pass");
    }

    #[test]
    fn test_profile_form_full() {
        let form = ProfileForm::new(" 홍길순 ", "010-2222-3333", "female", "2000-02-29").unwrap();
        assert_eq!(form.name(), "홍길순");
        assert_eq!(form.phone(), Some("010-2222-3333"));
        assert_eq!(form.gender(), Some(Gender::Female));
        assert_eq!(form.birth(), NaiveDate::from_ymd_opt(2000, 2, 29));
    }

    #[test]
    fn test_profile_form_blank_optionals() {
        let form = ProfileForm::new("홍길동", " ", "", "").unwrap();
        assert_eq!(form.phone(), None);
        assert_eq!(form.gender(), None);
        assert_eq!(form.birth(), None);
    }

    #[test]
    fn test_profile_form_rejections() {
        assert_eq!(
            ProfileForm::new("  ", "", "", "").unwrap_err(),
            AuthError::MissingField("이름")
        );
        assert_eq!(
            ProfileForm::new("홍길동", "", "other", "").unwrap_err(),
            AuthError::InvalidGender
        );
        for birth in ["1999-02-30", "20/05/1999", "1999-5"] {
            assert_eq!(
                ProfileForm::new("홍길동", "", "", birth).unwrap_err(),
                AuthError::InvalidBirthDate
            );
        }
    }

    #[test]
    fn test_signup_minimal() {
        let form = SignupForm::validate(&signup()).unwrap();
        assert_eq!(form.name, "김아테나");
        assert_eq!(form.email.as_str(), "athena@aion.kr");
        assert!(form.phone.is_none());
        assert!(form.gender.is_none());
        assert!(form.birth.is_none());
        assert_eq!(form.password.expose_secret(), "olive-branch");
    }

    #[test]
    fn test_signup_full_profile() {
        let fields = SignupFields {
            phone: "010-9876-5432",
            gender: "female",
            birth_year: "1998",
            birth_month: "2",
            birth_day: "28",
            agree_marketing: true,
            ..signup()
        };
        let form = SignupForm::validate(&fields).unwrap();
        assert_eq!(form.phone.as_deref(), Some("010-9876-5432"));
        assert_eq!(form.gender, Some(Gender::Female));
        assert_eq!(form.birth, NaiveDate::from_ymd_opt(1998, 2, 28));
        assert!(form.agree_marketing);
    }

    #[test]
    fn test_signup_rejections_in_form_order() {
        let cases = [
            (SignupFields { name: " ", ..signup() }, AuthError::MissingField("이름")),
            (SignupFields { email: "", ..signup() }, AuthError::MissingField("이메일")),
            (
                SignupFields { email: "athena", ..signup() },
                AuthError::InvalidEmail(crate::types::EmailError::MissingAtSymbol),
            ),
            (SignupFields { password: "", password_confirm: "", ..signup() }, AuthError::MissingField("비밀번호")),
            (SignupFields { password_confirm: "olive", ..signup() }, AuthError::PasswordMismatch),
            (SignupFields { gender: "other", ..signup() }, AuthError::InvalidGender),
            (
                SignupFields { birth_year: "1999", birth_month: "2", birth_day: "30", ..signup() },
                AuthError::InvalidBirthDate,
            ),
            (SignupFields { birth_year: "1999", ..signup() }, AuthError::InvalidBirthDate),
            (SignupFields { agree_terms: false, ..signup() }, AuthError::TermsNotAccepted),
        ];
        for (fields, expected) in cases {
            assert_eq!(SignupForm::validate(&fields).unwrap_err(), expected);
        }
    }
}
