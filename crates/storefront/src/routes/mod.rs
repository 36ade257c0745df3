//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (categories, featured items)
//! GET  /menu                   - Menu (?category=<id>|all&q=<text>)
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (catalog settled)
//!
//! # Cart
//! GET  /cart                   - Cart page with checkout summary
//! POST /cart/add               - Add one of an item
//! POST /cart/update            - Set a line's quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Place the order (requires sign-in)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account
//! GET  /orders                 - Order history
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod menu;
pub mod orders;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use forkful_core::{Cart, MenuItem, User};

use crate::catalog::LoadState;
use crate::state::AppState;

/// Data every page's header needs.
#[derive(Debug, Clone, Default)]
pub struct LayoutView {
    /// Display name of the signed-in user.
    pub user_name: Option<String>,
    /// Items in the cart badge.
    pub cart_count: u64,
}

impl LayoutView {
    #[must_use]
    pub fn new(user: Option<&User>, cart: &Cart) -> Self {
        Self {
            user_name: user.map(|u| u.name.clone()),
            cart_count: cart.total_items(),
        }
    }
}

/// Catalog state as the menu templates see it.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<MenuItem>,
}

impl CatalogView {
    /// Build from a catalog snapshot, keeping the items `select` picks.
    pub fn from_state<F>(state: LoadState<Arc<[MenuItem]>>, select: F) -> Self
    where
        F: FnOnce(&[MenuItem]) -> Vec<MenuItem>,
    {
        match state {
            LoadState::Idle | LoadState::Loading => Self {
                loading: true,
                ..Self::default()
            },
            LoadState::Failed(message) => {
                tracing::debug!(%message, "Rendering failed catalog state");
                Self {
                    error: Some("Failed to load menu".to_string()),
                    ..Self::default()
                }
            }
            LoadState::Loaded(items) => Self {
                items: select(&items),
                ..Self::default()
            },
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/menu", get(menu::index))
        .route("/checkout", post(cart::checkout))
        .route("/orders", get(orders::index))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog load has finished,
/// successfully or not. A failed catalog is still "ready": the menu renders
/// its error state.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_settled() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
