//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FORKFUL_BASE_URL` - Public URL for the storefront (`https` enables secure cookies)
//!
//! ## Optional
//! - `FORKFUL_HOST` - Bind address (default: 127.0.0.1)
//! - `FORKFUL_PORT` - Listen port (default: 3000)
//! - `FORKFUL_CATALOG_URL` - Remote menu endpoint (default: bundled menu)
//! - `FORKFUL_AUTH_URL` - Authentication service base URL (default: demo accounts)
//! - `FORKFUL_DELIVERY_FEE` - Delivery fee per order (default: 2.99)
//! - `FORKFUL_TAX_RATE` - Tax rate as a fraction (default: 0.08)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)
//! - `FORKFUL_LOG_FORMAT` - `json` for structured logs (read by the binary)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use forkful_core::{Price, PricingPolicy};

use crate::catalog::CatalogSource;
use crate::services::auth::{AuthBackend, DemoAuthenticator, RemoteAuthenticator};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Remote menu endpoint; `None` serves the bundled menu
    pub catalog_url: Option<Url>,
    /// Authentication service; `None` uses the demo rules
    pub auth_url: Option<Url>,
    /// Delivery fee and tax applied at checkout
    pub pricing: PricingPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parsed_or("FORKFUL_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parsed_or("FORKFUL_PORT", 3000_u16)?;
        let base_url = env.url("FORKFUL_BASE_URL")?.ok_or_else(|| {
            ConfigError::MissingEnvVar("FORKFUL_BASE_URL".to_string())
        })?;
        let catalog_url = env.url("FORKFUL_CATALOG_URL")?;
        let auth_url = env.url("FORKFUL_AUTH_URL")?;

        let defaults = PricingPolicy::default();
        let delivery_fee = match env.get("FORKFUL_DELIVERY_FEE") {
            Some(raw) => Price::parse(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("FORKFUL_DELIVERY_FEE".into(), e.to_string()))?,
            None => defaults.delivery_fee,
        };
        let tax_rate = env.parsed_or("FORKFUL_TAX_RATE", defaults.tax_rate)?;
        if tax_rate.is_sign_negative() || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "FORKFUL_TAX_RATE".to_string(),
                format!("{tax_rate} is not between 0 and 1"),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            catalog_url,
            auth_url,
            pricing: PricingPolicy {
                delivery_fee,
                tax_rate,
            },
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.parsed_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }

    /// Where the menu is loaded from.
    #[must_use]
    pub fn catalog_source(&self) -> CatalogSource {
        self.catalog_url
            .clone()
            .map_or(CatalogSource::Bundled, CatalogSource::Remote)
    }

    /// The authenticator this deployment uses.
    #[must_use]
    pub fn auth_backend(&self) -> AuthBackend {
        self.auth_url.clone().map_or_else(
            || AuthBackend::Demo(DemoAuthenticator::new()),
            |url| AuthBackend::Remote(RemoteAuthenticator::new(url)),
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the parsing helpers.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Non-empty value of `key`.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    fn url(&self, key: &str) -> Result<Option<Url>, ConfigError> {
        self.get(key)
            .map(|raw| {
                Url::parse(&raw)
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("FORKFUL_BASE_URL", "http://localhost:3000")]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.secure_cookies());
        assert!(matches!(config.catalog_source(), CatalogSource::Bundled));
        assert!(matches!(config.auth_backend(), AuthBackend::Demo(_)));
        assert_eq!(config.pricing, PricingPolicy::default());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_base_url_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "FORKFUL_BASE_URL"));
    }

    #[test]
    fn test_remote_collaborators_and_https() {
        let config = load(&[
            ("FORKFUL_BASE_URL", "https://forkful.example"),
            ("FORKFUL_CATALOG_URL", "http://api.local/api/foods/"),
            ("FORKFUL_AUTH_URL", "http://api.local/api"),
            ("FORKFUL_PORT", "8080"),
        ])
        .unwrap();

        assert!(config.secure_cookies());
        assert_eq!(config.port, 8080);
        assert!(matches!(config.catalog_source(), CatalogSource::Remote(_)));
        assert!(matches!(config.auth_backend(), AuthBackend::Remote(_)));
    }

    #[test]
    fn test_pricing_overrides() {
        let config = load(&[
            ("FORKFUL_BASE_URL", "http://localhost"),
            ("FORKFUL_DELIVERY_FEE", "4.50"),
            ("FORKFUL_TAX_RATE", "0.1"),
        ])
        .unwrap();
        assert_eq!(config.pricing.delivery_fee, Price::from_cents(450));
        assert_eq!(config.pricing.tax_rate, Decimal::new(1, 1));
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("FORKFUL_PORT", "eighty"),
            ("FORKFUL_HOST", "localhost"),
            ("FORKFUL_CATALOG_URL", "not a url"),
            ("FORKFUL_DELIVERY_FEE", "-1"),
            ("FORKFUL_TAX_RATE", "1.5"),
        ] {
            let err = load(&[("FORKFUL_BASE_URL", "http://localhost"), (key, value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == key),
                "{key}={value}"
            );
        }
    }

    #[test]
    fn test_blank_optional_values_are_unset() {
        let config = load(&[
            ("FORKFUL_BASE_URL", "http://localhost"),
            ("FORKFUL_AUTH_URL", "  "),
        ])
        .unwrap();
        assert!(config.auth_url.is_none());
    }
}
