//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use forkful_core::Category;

use super::{CatalogView, LayoutView};
use crate::middleware::{CurrentCart, OptionalAuth};
use crate::state::AppState;

/// Number of items featured on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    pub categories: &'static [Category],
    pub featured: CatalogView,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    CurrentCart(cart): CurrentCart,
) -> impl IntoResponse {
    HomeTemplate {
        layout: LayoutView::new(user.as_ref(), cart.cart()),
        categories: &Category::MENU,
        featured: CatalogView::from_state(state.catalog().state(), |items| {
            items.iter().take(FEATURED_COUNT).cloned().collect()
        }),
    }
}
