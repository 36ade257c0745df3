//! Menu page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use forkful_core::{Category, CategoryFilter, MenuQuery};

use super::{CatalogView, LayoutView};
use crate::middleware::{CurrentCart, OptionalAuth};
use crate::state::AppState;

/// Menu query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MenuParams {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub layout: LayoutView,
    pub categories: &'static [Category],
    /// Selected category id, `all` when unfiltered.
    pub selected: &'static str,
    pub search: String,
    pub menu: CatalogView,
    /// Path to come back to after adding to the cart.
    pub return_to: String,
}

/// Display the menu, filtered by category and search text.
#[instrument(skip(state, user, cart))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    CurrentCart(cart): CurrentCart,
    Query(params): Query<MenuParams>,
) -> impl IntoResponse {
    let filter = CategoryFilter::from_param(params.category.as_deref());
    let search = params.q.unwrap_or_default();
    let query = MenuQuery::new(filter, &search);

    let return_to = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("category", filter.id())
        .append_pair("q", search.trim())
        .finish();

    MenuTemplate {
        layout: LayoutView::new(user.as_ref(), cart.cart()),
        categories: &Category::MENU,
        selected: filter.id(),
        search: search.trim().to_string(),
        menu: CatalogView::from_state(state.catalog().state(), |items| {
            query.apply(items).into_iter().cloned().collect()
        }),
        return_to: format!("/menu?{return_to}"),
    }
}
