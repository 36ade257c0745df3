//! Order history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use forkful_core::Order;

use super::LayoutView;
use crate::middleware::{CurrentCart, OptionalAuth};
use crate::services::orders::demo_history;

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub layout: LayoutView,
    pub signed_in: bool,
    pub orders: Vec<Order>,
}

/// Display the order history. Signed-out visitors get a sign-in prompt.
#[instrument(skip_all)]
pub async fn index(
    OptionalAuth(user): OptionalAuth,
    CurrentCart(cart): CurrentCart,
) -> impl IntoResponse {
    let orders = if user.is_some() {
        demo_history()
    } else {
        Vec::new()
    };

    OrdersTemplate {
        layout: LayoutView::new(user.as_ref(), cart.cart()),
        signed_in: user.is_some(),
        orders,
    }
}
