//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOUQ_ADMIN_PASSWORD` - Password for the admin account (high entropy, not a placeholder)
//!
//! ## Optional
//! - `SOUQ_ADMIN_USERNAME` - Admin account name (default: admin)
//! - `SOUQ_ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `SOUQ_ADMIN_PORT` - Listen port (default: 3001)
//! - `SOUQ_BASE_URL` - Public URL of the admin panel (default: `http://localhost:3001`)
//! - `SOUQ_SEED_PATH` - YAML catalog to load at startup (default: built-in sample catalog)
//! - `SOUQ_DEFAULT_LOCALE` - `en` or `ar` (default: en)
//! - `SOUQ_PAGE_SIZE` - Rows per table page (default: 25, max: 200)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)
//!
//! ## Optional (read-only account)
//! - `SOUQ_VIEWER_USERNAME` - Viewer account name
//! - `SOUQ_VIEWER_PASSWORD` - Viewer account password

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use souq_core::{AdminRole, Locale};
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Rows per page when `SOUQ_PAGE_SIZE` is unset.
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Largest page a client may ask for.
pub const MAX_PAGE_SIZE: usize = 200;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Accounts allowed to sign in
    pub accounts: Vec<AdminAccount>,
    /// Catalog seed file; `None` loads the built-in sample catalog
    pub seed_path: Option<PathBuf>,
    /// Locale used when a request does not ask for one
    pub default_locale: Locale,
    /// Rows per table page when a request does not ask for a size
    pub page_size: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// A sign-in account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password: SecretString,
    pub role: AdminRole,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl AdminAccount {
    #[must_use]
    pub fn new(username: &str, password: &str, role: AdminRole) -> Self {
        Self {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
            role,
        }
    }

    /// Whether `username`/`password` name this account.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let expected = self.password.expose_secret().as_bytes();
        let given = password.as_bytes();
        // compare every byte so timing does not reveal the matching prefix
        let same_password = expected.len() == given.len()
            && expected
                .iter()
                .zip(given)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0;
        self.username == username && same_password
    }
}

impl AdminConfig {
    /// Local configuration with a single account and every optional setting
    /// at its default.
    #[must_use]
    pub fn new(admin: AdminAccount) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            accounts: vec![admin],
            seed_path: None,
            default_locale: Locale::En,
            page_size: DEFAULT_PAGE_SIZE,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    /// Add another sign-in account.
    #[must_use]
    pub fn with_account(mut self, account: AdminAccount) -> Self {
        self.accounts.push(account);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SOUQ_ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SOUQ_ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("SOUQ_BASE_URL", &format!("http://localhost:{port}"));

        let admin = AdminAccount {
            username: get_env_or_default("SOUQ_ADMIN_USERNAME", "admin"),
            password: get_validated_secret("SOUQ_ADMIN_PASSWORD")?,
            role: AdminRole::SuperAdmin,
        };
        let mut accounts = vec![admin];
        if let Some(viewer) = viewer_from_env()? {
            accounts.push(viewer);
        }

        let seed_path = get_optional_env("SOUQ_SEED_PATH").map(PathBuf::from);
        let default_locale = get_env_or_default("SOUQ_DEFAULT_LOCALE", "en")
            .parse::<Locale>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SOUQ_DEFAULT_LOCALE".to_string(), e.to_string())
            })?;
        let page_size = parse_page_size(&get_env_or_default(
            "SOUQ_PAGE_SIZE",
            &DEFAULT_PAGE_SIZE.to_string(),
        ))?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            accounts,
            seed_path,
            default_locale,
            page_size,
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

    /// Whether the panel is served over HTTPS (session cookies get `Secure`).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// The account matching `username`/`password`, if any.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<(usize, &AdminAccount)> {
        self.accounts
            .iter()
            .enumerate()
            .find(|(_, account)| account.verify(username, password))
    }
}

/// Load the optional read-only account.
///
/// Both variables must be set together.
fn viewer_from_env() -> Result<Option<AdminAccount>, ConfigError> {
    let username = get_optional_env("SOUQ_VIEWER_USERNAME");
    let password = get_optional_env("SOUQ_VIEWER_PASSWORD");

    match (username, password) {
        (Some(username), Some(password)) => {
            validate_secret_strength(&password, "SOUQ_VIEWER_PASSWORD")?;
            Ok(Some(AdminAccount {
                username,
                password: SecretString::from(password),
                role: AdminRole::Viewer,
            }))
        }
        (None, None) => Ok(None),
        _ => Err(ConfigError::InvalidEnvVar(
            "SOUQ_VIEWER_*".to_string(),
            "Both SOUQ_VIEWER_USERNAME and SOUQ_VIEWER_PASSWORD must be set together".to_string(),
        )),
    }
}

/// Parse and bound-check a page size.
fn parse_page_size(value: &str) -> Result<usize, ConfigError> {
    let size = value
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_PAGE_SIZE".to_string(), e.to_string()))?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar(
            "SOUQ_PAGE_SIZE".to_string(),
            format!("must be between 1 and {MAX_PAGE_SIZE} (got {size})"),
        ));
    }
    Ok(size)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated password."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));

        let result = validate_secret_strength("MyPassword!2026", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_page_size_bounds() {
        assert_eq!(parse_page_size("50").unwrap(), 50);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("201").is_err());
        assert!(parse_page_size("many").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut config = AdminConfig::new(AdminAccount::new(
            "admin",
            "aB3$xY9!mK2@nL5#",
            AdminRole::SuperAdmin,
        ));
        config.port = 4001;

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4001);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_authenticate_picks_matching_account() {
        let config = AdminConfig::new(AdminAccount::new(
            "admin",
            "aB3$xY9!mK2@nL5#",
            AdminRole::SuperAdmin,
        ))
        .with_account(AdminAccount::new("sara", "Zq8#vL1!pR4@", AdminRole::Viewer));

        let (index, account) = config.authenticate("sara", "Zq8#vL1!pR4@").unwrap();
        assert_eq!(index, 1);
        assert_eq!(account.role, AdminRole::Viewer);

        assert!(config.authenticate("sara", "Zq8#vL1!pR4").is_none());
        assert!(config.authenticate("admin", "Zq8#vL1!pR4@").is_none());
        assert!(config.authenticate("nobody", "").is_none());
    }

    #[test]
    fn test_admin_account_debug_redacts_password() {
        let account = AdminAccount::new("admin", "super_hidden_value", AdminRole::Admin);
        let debug_output = format!("{account:?}");

        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_hidden_value"));
    }
}
