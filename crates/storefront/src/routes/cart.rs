//! Cart route handlers.
//!
//! Cart mutations are plain form posts that redirect back (post/redirect/
//! get). Each one also sets `HX-Trigger: cart-updated` so an HTMX-enhanced
//! page can refresh the cart badge without a reload.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use forkful_core::{Cart, CartLine, CheckoutSummary, MenuItem, MenuItemId};

use super::LayoutView;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{CurrentCart, CurrentSession, OptionalAuth, login_url, safe_next};
use crate::services::{CheckoutError, checkout as place_order};
use crate::state::AppState;

/// Header that tells HTMX listeners the cart changed.
const CART_UPDATED: (&str, &str) = ("HX-Trigger", "cart-updated");

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: MenuItemId,
    /// Local path to return to; defaults to the cart page.
    pub next: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: MenuItemId,
    /// Zero or negative removes the line.
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: MenuItemId,
}

/// Cart page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: Cart,
    pub summary: CheckoutSummary,
    pub signed_in: bool,
    pub error: Option<String>,
}

impl CartShowTemplate {
    /// Quantity the "−" button submits.
    #[must_use]
    pub fn fewer(&self, line: &CartLine) -> i64 {
        i64::from(line.quantity()) - 1
    }

    /// Quantity the "+" button submits.
    #[must_use]
    pub fn more(&self, line: &CartLine) -> i64 {
        i64::from(line.quantity()) + 1
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirmation.html")]
pub struct ConfirmationTemplate {
    pub layout: LayoutView,
    pub summary: CheckoutSummary,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Map a cart page error code to a message.
fn error_message(code: &str) -> Option<String> {
    match code {
        "empty" => Some(CheckoutError::EmptyCart.to_string()),
        _ => None,
    }
}

/// Resolve a form's item id against the loaded catalog.
fn find_item(state: &AppState, id: MenuItemId) -> Result<MenuItem> {
    if state.catalog().items().is_none() {
        return Err(AppError::Unavailable(
            "The menu is not available right now".to_string(),
        ));
    }
    state
        .catalog()
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))
}

fn updated(to: &str) -> Response {
    (AppendHeaders([CART_UPDATED]), Redirect::to(to)).into_response()
}

// =============================================================================
// Routes
// =============================================================================

/// Display the cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    CurrentCart(cart): CurrentCart,
    Query(query): Query<CartQuery>,
) -> impl IntoResponse {
    let cart = cart.cart();
    CartShowTemplate {
        layout: LayoutView::new(user.as_ref(), cart),
        summary: CheckoutSummary::for_cart(cart, state.pricing()),
        cart: cart.clone(),
        signed_in: user.is_some(),
        error: query.error.as_deref().and_then(error_message),
    }
}

/// Add one of an item to the cart.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    CurrentCart(mut cart): CurrentCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let item = find_item(&state, form.item_id)?;
    if !item.available {
        return Err(AppError::BadRequest(
            "This item is not available".to_string(),
        ));
    }

    cart.add(&item).await?;
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("item_id", &item.id.to_string())]),
    );

    Ok(updated(&safe_next(form.next.as_deref(), "/cart")))
}

/// Set a line's quantity.
#[instrument(skip(cart))]
pub async fn update(
    CurrentCart(mut cart): CurrentCart,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    cart.update_quantity(form.item_id, form.quantity).await?;
    Ok(updated("/cart"))
}

/// Remove a line.
#[instrument(skip(cart))]
pub async fn remove(
    CurrentCart(mut cart): CurrentCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    cart.remove(form.item_id).await?;
    Ok(updated("/cart"))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn clear(CurrentCart(mut cart): CurrentCart) -> Result<Response> {
    cart.clear().await?;
    add_breadcrumb("cart", "Cleared cart", None);
    Ok(updated("/cart"))
}

/// Cart count badge.
#[instrument(skip_all)]
pub async fn count(CurrentCart(cart): CurrentCart) -> impl IntoResponse {
    CartCountTemplate {
        count: cart.cart().total_items(),
    }
}

/// Place the order.
///
/// Signed-out visitors are sent to sign in and come back to the cart, which
/// is left as it was.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    CurrentCart(mut cart): CurrentCart,
) -> Result<Response> {
    match place_order(&session, &mut cart, state.pricing()).await {
        Ok(receipt) => {
            add_breadcrumb("checkout", "Placed order", None);
            Ok(ConfirmationTemplate {
                layout: LayoutView::new(session.current_user(), cart.cart()),
                summary: receipt.summary,
            }
            .into_response())
        }
        Err(CheckoutError::NotAuthenticated) => {
            Ok(Redirect::to(&login_url("/cart")).into_response())
        }
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/cart?error=empty").into_response()),
        Err(CheckoutError::Storage(e)) => Err(e.into()),
    }
}
