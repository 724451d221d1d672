//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `AION_HOST` - Bind address (default: 127.0.0.1)
//! - `AION_PORT` - Listen port (default: 3000)
//! - `AION_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `AION_STATIC_DIR` - Directory served under `/static` (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Directory holding the stylesheet and other static assets
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url.as_str())
            .field("static_dir", &self.static_dir)
            .field(
                "sentry_dsn",
                &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let host = parse_var::<IpAddr>("AION_HOST", &vars.get_or_default("AION_HOST", DEFAULT_HOST))?;
        let port = parse_var::<u16>("AION_PORT", &vars.get_or_default("AION_PORT", DEFAULT_PORT))?;
        let base_url = parse_base_url(&vars.get_or_default("AION_BASE_URL", DEFAULT_BASE_URL))?;
        let static_dir = PathBuf::from(vars.get_or_default("AION_STATIC_DIR", DEFAULT_STATIC_DIR));

        let sentry_dsn = vars.get_optional("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = vars.get_optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate =
            parse_rate("SENTRY_SAMPLE_RATE", &vars.get_or_default("SENTRY_SAMPLE_RATE", "1.0"))?;
        let sentry_traces_sample_rate = parse_rate(
            "SENTRY_TRACES_SAMPLE_RATE",
            &vars.get_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    /// Get an optional variable; blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = parse_var::<f32>(key, value)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Parse the base URL; only http and https are served.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = parse_var::<Url>("AION_BASE_URL", value)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            "AION_BASE_URL".to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}
