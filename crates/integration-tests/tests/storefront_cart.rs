//! Cart and checkout flows through the full middleware stack.

use axum::http::StatusCode;
use forkful_integration_tests::TestApp;

async fn cart_count(app: &mut TestApp) -> String {
    let response = app.get("/cart/count").await;
    assert_eq!(response.status, StatusCode::OK);
    response.body
}

#[tokio::test]
async fn test_add_to_cart_redirects_and_counts() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/cart/add", &[("item_id", "1")]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));

    assert!(cart_count(&mut app).await.contains(">1<"));
}

#[tokio::test]
async fn test_add_honours_local_next_only() {
    let mut app = TestApp::new().await;

    let response = app
        .post_form("/cart/add", &[("item_id", "2"), ("next", "/menu?category=pizza")])
        .await;
    assert_eq!(response.location(), Some("/menu?category=pizza"));

    let response = app
        .post_form(
            "/cart/add",
            &[("item_id", "2"), ("next", "/menu?category=pizza&q=thin+crust")],
        )
        .await;
    assert_eq!(response.location(), Some("/menu?category=pizza&q=thin+crust"));

    let response = app
        .post_form("/cart/add", &[("item_id", "2"), ("next", "//evil.example")])
        .await;
    assert_eq!(response.location(), Some("/cart"));
}

#[tokio::test]
async fn test_same_item_merges_into_one_line() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", &[("item_id", "1")]).await;
    app.post_form("/cart/add", &[("item_id", "1")]).await;

    assert!(cart_count(&mut app).await.contains(">2<"));

    let page = app.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body.matches("<h3>Margherita Pizza</h3>").count(), 1);
    assert!(page.body.contains("$25.98"));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", &[("item_id", "1")]).await;
    app.post_form("/cart/add", &[("item_id", "3")]).await;

    let response = app
        .post_form("/cart/update", &[("item_id", "1"), ("quantity", "0")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    assert!(cart_count(&mut app).await.contains(">1<"));
    let page = app.get("/cart").await;
    assert!(!page.body.contains("Margherita Pizza"));
    assert!(page.body.contains("Double Bacon Burger"));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", &[("item_id", "1")]).await;
    app.post_form("/cart/add", &[("item_id", "9")]).await;

    app.post_form("/cart/remove", &[("item_id", "9")]).await;
    assert!(cart_count(&mut app).await.contains(">1<"));

    app.post_form("/cart/clear", &[]).await;
    assert!(cart_count(&mut app).await.contains(">0<"));
}

#[tokio::test]
async fn test_unknown_and_unavailable_items_are_rejected() {
    let mut app = TestApp::new().await;

    let missing = app.post_form("/cart/add", &[("item_id", "999")]).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    // Kung Pao Chicken is marked unavailable in the bundled menu.
    let unavailable = app.post_form("/cart/add", &[("item_id", "8")]).await;
    assert_eq!(unavailable.status, StatusCode::BAD_REQUEST);
    assert!(unavailable.body.contains("This item is not available"));

    assert!(cart_count(&mut app).await.contains(">0<"));
}

#[tokio::test]
async fn test_checkout_requires_sign_in_and_keeps_cart() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", &[("item_id", "1")]).await;

    let response = app.post_form("/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/auth/login?next=%2Fcart"));

    assert!(cart_count(&mut app).await.contains(">1<"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart() {
    let mut app = TestApp::new().await;
    app.login_demo().await;

    let response = app.post_form("/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart?error=empty"));

    let page = app.get("/cart?error=empty").await;
    assert!(page.body.contains("alert-error"));
    assert!(page.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_signed_in_checkout_places_order_and_clears_cart() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", &[("item_id", "1")]).await;
    app.login_demo().await;

    let response = app.post_form("/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Order placed!"));
    // $12.99 + $2.99 delivery + $1.04 tax
    assert!(response.body.contains("$17.02"));

    assert!(cart_count(&mut app).await.contains(">0<"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = TestApp::new().await;
    let mut bob = alice.new_visitor();

    alice.post_form("/cart/add", &[("item_id", "1")]).await;

    assert!(cart_count(&mut alice).await.contains(">1<"));
    assert!(cart_count(&mut bob).await.contains(">0<"));
}
