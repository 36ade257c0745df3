//! Application state shared across handlers.

use std::sync::Arc;

use forkful_core::PricingPolicy;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::AuthBackend;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Per-visitor state (session,
/// cart) is not here; it lives in the visitor's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    auth: AuthBackend,
    http: reqwest::Client,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// The catalog starts empty; call [`AppState::start_catalog_loading`].
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let auth = config.auth_backend();
        Self::with_parts(config, Catalog::new(), auth)
    }

    /// Create application state from prebuilt parts.
    #[must_use]
    pub fn with_parts(config: StorefrontConfig, catalog: Catalog, auth: AuthBackend) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
                http: reqwest::Client::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the configured authenticator.
    #[must_use]
    pub fn auth(&self) -> &AuthBackend {
        &self.inner.auth
    }

    /// Delivery fee and tax applied at checkout.
    #[must_use]
    pub fn pricing(&self) -> &PricingPolicy {
        &self.inner.config.pricing
    }

    /// Start loading the catalog in the background.
    pub fn start_catalog_loading(&self) {
        self.inner
            .catalog
            .start_loading(self.inner.config.catalog_source(), self.inner.http.clone());
    }
}
