//! Catalog pages, health probes and response headers.

use axum::http::StatusCode;
use forkful_integration_tests::TestApp;
use forkful_storefront::catalog::Catalog;

#[tokio::test]
async fn test_home_lists_categories_and_featured() {
    let mut app = TestApp::new().await;

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Margherita Pizza"));
    assert!(response.body.contains("/menu?category=indian"));
}

#[tokio::test]
async fn test_menu_category_filter() {
    let mut app = TestApp::new().await;

    let response = app.get("/menu?category=pizza").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Margherita Pizza"));
    assert!(response.body.contains("Pepperoni Pizza"));
    assert!(!response.body.contains("Butter Chicken"));
}

#[tokio::test]
async fn test_menu_search_is_case_insensitive() {
    let mut app = TestApp::new().await;

    let response = app.get("/menu?q=CHICKEN").await;
    assert!(response.body.contains("Butter Chicken"));
    assert!(response.body.contains("Crispy Chicken Burger"));
    assert!(!response.body.contains("Margherita Pizza"));
}

#[tokio::test]
async fn test_unknown_category_shows_everything() {
    let mut app = TestApp::new().await;

    let response = app.get("/menu?category=tapas").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Margherita Pizza"));
    assert!(response.body.contains("New York Cheesecake"));
}

#[tokio::test]
async fn test_loading_catalog_is_not_ready() {
    let mut app = TestApp::with_catalog(Catalog::new());

    assert_eq!(app.get("/health").await.status, StatusCode::OK);
    assert_eq!(
        app.get("/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );

    let add = app.post_form("/cart/add", &[("item_id", "1")]).await;
    assert_eq!(add.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_loaded_catalog_is_ready() {
    let mut app = TestApp::new().await;
    assert!(app.state().catalog().is_settled());
    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let mut app = TestApp::new().await;

    let response = app.get("/").await;
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert!(response.header("content-security-policy").is_some());
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::new().await;
    assert_eq!(app.get("/nowhere").await.status, StatusCode::NOT_FOUND);
}
