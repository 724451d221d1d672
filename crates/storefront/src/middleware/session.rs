//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions and maps the visitor's
//! session entries onto it, one session key per entry.

use aion_core::session::{SessionEntries, SessionKey, SessionStorage};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "aion_session";

/// One-shot entry holding the new member's name between signup and the
/// login screen. Kept apart from the profile entries.
pub const SIGNUP_NAME_KEY: &str = "signupName";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// Sessions do not survive a restart.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Read every known entry out of the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_entries(session: &Session) -> Result<SessionEntries, tower_sessions::session::Error> {
    let mut entries = SessionEntries::new();
    for key in SessionKey::ALL {
        if let Some(value) = session.get::<String>(key.as_str()).await? {
            entries.set(key, value);
        }
    }
    Ok(entries)
}

/// Write `entries` back to the session.
///
/// Present entries are inserted; absent ones are removed from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn commit_entries(
    session: &Session,
    entries: &SessionEntries,
) -> Result<(), tower_sessions::session::Error> {
    for key in SessionKey::ALL {
        match entries.get(key) {
            Some(value) => session.insert(key.as_str(), value).await?,
            None => {
                session.remove::<String>(key.as_str()).await?;
            }
        }
    }
    Ok(())
}

/// Stash the signup name for the next login-screen view.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn stash_signup_name(
    session: &Session,
    name: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(SIGNUP_NAME_KEY, name).await
}

/// Take the stashed signup name. It is removed on read.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_signup_name(
    session: &Session,
) -> Result<Option<String>, tower_sessions::session::Error> {
    session.remove::<String>(SIGNUP_NAME_KEY).await
}
