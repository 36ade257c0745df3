//! Helpers for tests that need a live HTTP collaborator.

#![allow(clippy::unwrap_used)]

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}
