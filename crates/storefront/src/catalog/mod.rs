//! Menu catalog.
//!
//! The catalog is loaded once at startup. The app starts immediately with
//! an empty catalog in [`LoadState::Idle`]; a background task fetches the
//! menu and swaps the result in when done. A failed load stays failed until
//! restart: there is no automatic retry.

mod records;

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tracing::instrument;
use url::Url;

use forkful_core::{MenuItem, MenuItemId};

pub use records::ingest;

/// Bundled fallback menu.
const BUNDLED_MENU: &str = include_str!("../../content/menu.json");

/// Where the menu comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// The menu compiled into the binary.
    Bundled,
    /// A JSON endpoint returning an array of menu records.
    Remote(Url),
}

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid catalog payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// State of a one-shot asynchronous fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    /// Whether the fetch has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }
}

/// Shared handle to the loaded menu.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inner: Arc<RwLock<LoadState<Arc<[MenuItem]>>>>,
}

impl Catalog {
    /// Create an empty catalog in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an already-loaded catalog.
    #[must_use]
    pub fn loaded(items: Vec<MenuItem>) -> Self {
        let catalog = Self::new();
        catalog.set(LoadState::Loaded(items.into()));
        catalog
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadState<Arc<[MenuItem]>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_settled())
            .unwrap_or(false)
    }

    /// Loaded items, or `None` while loading or after a failure.
    #[must_use]
    pub fn items(&self) -> Option<Arc<[MenuItem]>> {
        match self.state() {
            LoadState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a single item.
    #[must_use]
    pub fn find(&self, id: MenuItemId) -> Option<MenuItem> {
        self.items()?.iter().find(|item| item.id == id).cloned()
    }

    fn set(&self, state: LoadState<Arc<[MenuItem]>>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Spawn a background task that loads the catalog from `source`.
    pub fn start_loading(&self, source: CatalogSource, client: reqwest::Client) {
        tracing::info!(?source, "Spawning background catalog load task");
        let catalog = self.clone();
        tokio::spawn(async move {
            catalog.load(&source, &client).await;
        });
    }

    /// Load the catalog from `source`, moving through `Loading` to
    /// `Loaded` or `Failed`.
    #[instrument(skip(self, client))]
    pub async fn load(&self, source: &CatalogSource, client: &reqwest::Client) {
        self.set(LoadState::Loading);

        match fetch(source, client).await {
            Ok(items) => {
                tracing::info!(count = items.len(), "Catalog loaded");
                self.set(LoadState::Loaded(items.into()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                self.set(LoadState::Failed(e.to_string()));
            }
        }
    }
}

async fn fetch(
    source: &CatalogSource,
    client: &reqwest::Client,
) -> Result<Vec<MenuItem>, CatalogError> {
    match source {
        CatalogSource::Bundled => ingest(BUNDLED_MENU),
        CatalogSource::Remote(url) => {
            let response = client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status));
            }
            let body = response.text().await?;
            ingest(&body)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use forkful_core::Price;
    use serde_json::json;

    use super::*;
    use crate::testing::serve;

    #[tokio::test]
    async fn test_bundled_catalog_loads() {
        let catalog = Catalog::new();
        assert_eq!(catalog.state(), LoadState::Idle);
        assert!(!catalog.is_settled());

        catalog
            .load(&CatalogSource::Bundled, &reqwest::Client::new())
            .await;
        assert!(catalog.is_settled());

        let items = catalog.items().unwrap();
        assert!(items.len() >= 4);
        let rice = items
            .iter()
            .find(|item| item.name == "Vegetable Fried Rice")
            .unwrap();
        assert_eq!(catalog.find(rice.id).unwrap().name, rice.name);
    }

    #[tokio::test]
    async fn test_unreachable_remote_fails_without_retry() {
        let catalog = Catalog::new();
        // Port 9 (discard) on localhost: refused immediately
        let url = Url::parse("http://127.0.0.1:9/foods/").unwrap();
        catalog
            .load(&CatalogSource::Remote(url), &reqwest::Client::new())
            .await;

        assert!(matches!(catalog.state(), LoadState::Failed(_)));
        assert!(catalog.is_settled());
        assert!(catalog.items().is_none());
    }

    #[tokio::test]
    async fn test_remote_catalog_loads() {
        let base = serve(Router::new().route(
            "/api/foods/",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "Margherita", "price": "12.50", "category": "pizza"},
                    {"id": 2, "name": "Smash Burger", "price": 9.5, "category": "burger"},
                    {"id": 3, "name": "Free Lunch", "price": "-1", "category": "other"}
                ]))
            }),
        ))
        .await;

        let catalog = Catalog::new();
        catalog
            .load(
                &CatalogSource::Remote(base.join("api/foods/").unwrap()),
                &reqwest::Client::new(),
            )
            .await;

        let items = catalog.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            catalog.find(MenuItemId::new(2)).unwrap().price,
            Price::from_cents(950)
        );
    }

    #[tokio::test]
    async fn test_remote_error_status_fails() {
        let base = serve(Router::new().route(
            "/api/foods/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        ))
        .await;

        let catalog = Catalog::new();
        catalog
            .load(
                &CatalogSource::Remote(base.join("api/foods/").unwrap()),
                &reqwest::Client::new(),
            )
            .await;

        let LoadState::Failed(message) = catalog.state() else {
            panic!("expected a failed load, got {:?}", catalog.state());
        };
        assert!(message.contains("503"), "{message}");
        assert!(catalog.items().is_none());
    }

    #[tokio::test]
    async fn test_remote_payload_that_is_not_an_array_fails() {
        let base = serve(Router::new().route(
            "/api/foods/",
            get(|| async { Json(json!({"results": []})) }),
        ))
        .await;

        let catalog = Catalog::new();
        catalog
            .load(
                &CatalogSource::Remote(base.join("api/foods/").unwrap()),
                &reqwest::Client::new(),
            )
            .await;

        assert!(matches!(catalog.state(), LoadState::Failed(_)));
    }

    #[test]
    fn test_find_misses() {
        let catalog = Catalog::new();
        assert!(catalog.find(MenuItemId::new(1)).is_none());
    }
}
