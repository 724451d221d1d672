//! The single hard-coded account the login screen accepts.

use core::fmt;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::forms::LoginForm;

/// Gender as stored in the `userGender` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the stored/submitted value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "남성",
            Self::Female => "여성",
        }
    }
}

/// The mock account. Its password never changes.
pub struct MockAccount {
    pub email: &'static str,
    password: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
    pub gender: Gender,
    /// ISO-8601 date.
    pub birth: &'static str,
}

impl MockAccount {
    /// Exact, case-sensitive comparison of both email and password.
    #[must_use]
    pub fn authenticate(&self, form: &LoginForm) -> bool {
        form.email() == self.email && form.password().expose_secret() == self.password
    }
}

impl fmt::Debug for MockAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockAccount")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The account every successful login resolves to.
pub const MOCK_ACCOUNT: MockAccount = MockAccount {
    email: "test@test.com",
    password: "password1234",
    name: "홍길동",
    phone: "010-1234-5678",
    gender: Gender::Male,
    birth: "1999-05-20",
};
