//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding the persisted cart, wishlist
//!   and favorites (default: .keeg-store)
//! - `CATALOG_BASE_URL` - Product catalog API root (default: <https://fakestoreapi.com>)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog response cache lifetime (default: 300)
//! - `FEATURED_PRODUCT_LIMIT` - Products shown on the home view (default: 6)
//! - `NOTIFICATION_DISMISS_MS` - Notification lifetime (default: 3000)
//! - `CHECKOUT_PROCESSING_MS` - Simulated payment processing time (default: 2000)
//! - `CHECKOUT_REDIRECT_MS` - Delay before leaving the success view (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Remote product catalog configuration
    pub catalog: CatalogConfig,
    /// Notification and checkout timing
    pub timing: TimingConfig,
    /// Number of products on the home view
    pub featured_limit: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote product catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://fakestoreapi.com`
    pub base_url: Url,
    /// How long catalog responses stay cached
    pub cache_ttl: Duration,
}

/// Delays for transient UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// How long a notification stays visible
    pub notification_dismiss: Duration,
    /// Simulated payment processing time
    pub checkout_processing: Duration,
    /// Time the success view is shown before redirecting home
    pub checkout_redirect: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_dismiss: Duration::from_millis(3000),
            checkout_processing: Duration::from_millis(2000),
            checkout_redirect: Duration::from_millis(3000),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("STOREFRONT_PORT", "3000")?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", ".keeg-store"));
        let featured_limit = parse_env_or_default("FEATURED_PRODUCT_LIMIT", "6")?;

        Ok(Self {
            host,
            port,
            data_dir,
            catalog: CatalogConfig::from_env()?,
            timing: TimingConfig::from_env()?,
            featured_limit,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Catalog pointed at `base_url` with the default cache lifetime.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            cache_ttl: Duration::from_secs(300),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "CATALOG_BASE_URL",
            &get_env_or_default("CATALOG_BASE_URL", "https://fakestoreapi.com"),
        )?;
        let ttl_secs: u64 = parse_env_or_default("CATALOG_CACHE_TTL_SECS", "300")?;

        Ok(Self {
            base_url,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl TimingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let millis = |key: &str, default: &str| -> Result<Duration, ConfigError> {
            parse_env_or_default::<u64>(key, default).map(Duration::from_millis)
        };

        Ok(Self {
            notification_dismiss: millis("NOTIFICATION_DISMISS_MS", "3000")?,
            checkout_processing: millis("CHECKOUT_PROCESSING_MS", "2000")?,
            checkout_redirect: millis("CHECKOUT_REDIRECT_MS", "3000")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

/// Parse a raw value, naming `key` in the error.
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an API root URL. Only http(s) is accepted.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = parse_value::<Url>(key, raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}
