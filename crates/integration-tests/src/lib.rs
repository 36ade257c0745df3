//! Integration tests for the Forkful storefront.
//!
//! The storefront router is driven in process with `tower::ServiceExt`; no
//! listener, no network. [`TestApp`] plays the browser: it keeps the session
//! cookie between requests so cart and sign-in state carry over.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p forkful-integration-tests
//! ```

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;
use url::form_urlencoded;

use forkful_storefront::catalog::{Catalog, CatalogSource};
use forkful_storefront::config::StorefrontConfig;
use forkful_storefront::middleware::session::SESSION_COOKIE_NAME;
use forkful_storefront::state::AppState;

/// Largest response body the harness reads.
const BODY_LIMIT: usize = 1024 * 1024;

/// Configuration for a local, plain-HTTP storefront.
///
/// # Panics
///
/// Panics if the fixed test configuration is rejected.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|key| match key {
        "FORKFUL_BASE_URL" => Some("http://localhost:3000".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// A response with its body read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Value of an arbitrary header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// In-process storefront plus one browser's cookie jar.
pub struct TestApp {
    router: Router,
    state: AppState,
    cookie: Option<String>,
}

impl TestApp {
    /// Storefront with the bundled menu already loaded.
    pub async fn new() -> Self {
        let catalog = Catalog::new();
        catalog
            .load(&CatalogSource::Bundled, &reqwest::Client::new())
            .await;
        Self::with_catalog(catalog)
    }

    /// Storefront over an arbitrary catalog (e.g. one still loading).
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let config = test_config();
        let auth = config.auth_backend();
        let state = AppState::with_parts(config, catalog, auth);
        Self {
            router: forkful_storefront::app(state.clone()),
            state,
            cookie: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// A second browser against the same server.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            state: self.state.clone(),
            cookie: None,
        }
    }

    /// `GET path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty());
        self.send(request).await
    }

    /// `POST path` with a url-encoded form body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_form(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body));
        self.send(request).await
    }

    /// Sign in with the demo account.
    ///
    /// # Panics
    ///
    /// Panics if the demo login is not accepted.
    pub async fn login_demo(&mut self) {
        let response = self
            .post_form(
                "/auth/login",
                &[("email", "demo@example.com"), ("password", "password")],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    #[allow(clippy::expect_used)]
    async fn send(
        &mut self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> TestResponse {
        let request = request.expect("request builds");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        self.remember_cookie(&headers);

        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn remember_cookie(&mut self, headers: &HeaderMap) {
        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let Some(pair) = value.split(';').next() else {
                continue;
            };
            if pair.starts_with(&prefix) {
                self.cookie = Some(pair.to_string());
            }
        }
    }
}

