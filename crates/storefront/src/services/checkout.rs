//! Checkout flow.
//!
//! There is no payment or fulfilment backend: checking out prices the cart,
//! clears it, and hands back a receipt for the confirmation page.

use thiserror::Error;
use tracing::instrument;

use forkful_core::{CheckoutSummary, PricingPolicy, UserId};

use super::auth::SessionStore;
use super::cart::CartStore;
use crate::storage::{KeyValueStore, StorageError};

/// Reasons a checkout does not go through. Nothing is changed in any case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("sign in to check out")]
    NotAuthenticated,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// What was charged.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub user_id: UserId,
    pub summary: CheckoutSummary,
}

/// Check out the cart for the signed-in user.
///
/// # Errors
///
/// `NotAuthenticated` and `EmptyCart` leave the cart untouched. `Storage`
/// means the emptied cart could not be saved.
#[instrument(skip_all)]
pub async fn checkout<S, C>(
    session: &SessionStore<S>,
    cart: &mut CartStore<C>,
    policy: &PricingPolicy,
) -> Result<CheckoutReceipt, CheckoutError>
where
    S: KeyValueStore,
    C: KeyValueStore,
{
    let user = session.current_user().ok_or(CheckoutError::NotAuthenticated)?;
    if cart.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let summary = CheckoutSummary::for_cart(cart.cart(), policy);
    cart.clear().await?;

    tracing::info!(
        user_id = %user.id,
        items = summary.item_count,
        total = %summary.total,
        "Order placed"
    );

    Ok(CheckoutReceipt {
        user_id: user.id,
        summary,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forkful_core::{Category, MenuItem, MenuItemId, Price};
    use secrecy::SecretString;

    use super::*;
    use crate::services::auth::{AuthBackend, DemoAuthenticator};
    use crate::storage::MemoryStorage;

    fn burger() -> MenuItem {
        MenuItem {
            id: MenuItemId::new(3),
            name: "Double Bacon Burger".to_string(),
            description: "Two patties".to_string(),
            price: Price::from_cents(1000),
            image: None,
            category: Category::Burger,
            available: true,
            rating: Some(4.7),
        }
    }

    #[tokio::test]
    async fn test_signed_out_checkout_keeps_cart_and_session() {
        let storage = MemoryStorage::new();
        let session = SessionStore::hydrate(storage.clone()).await;
        let mut cart = CartStore::load(storage.clone()).await;
        cart.add(&burger()).await.unwrap();

        let err = checkout(&session, &mut cart, &PricingPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::NotAuthenticated));
        assert_eq!(cart.cart().total_items(), 1);
        assert!(!session.is_authenticated());
        assert_eq!(CartStore::load(storage).await.cart().total_items(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::hydrate(storage.clone()).await;
        session
            .login(
                &AuthBackend::Demo(DemoAuthenticator::new()),
                "demo@example.com",
                &SecretString::from("password".to_owned()),
            )
            .await
            .unwrap();
        let mut cart = CartStore::load(storage).await;

        let err = checkout(&session, &mut cart, &PricingPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_returns_summary() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::hydrate(storage.clone()).await;
        session
            .login(
                &AuthBackend::Demo(DemoAuthenticator::new()),
                "demo@example.com",
                &SecretString::from("password".to_owned()),
            )
            .await
            .unwrap();
        let mut cart = CartStore::load(storage.clone()).await;
        cart.add(&burger()).await.unwrap();
        cart.add(&burger()).await.unwrap();

        let receipt = checkout(&session, &mut cart, &PricingPolicy::default())
            .await
            .unwrap();
        assert_eq!(receipt.summary.total.to_string(), "$24.59");
        assert!(cart.cart().is_empty());
        assert!(CartStore::load(storage).await.cart().is_empty());
        assert!(session.is_authenticated());
    }
}
