//! Session extractors.
//!
//! Every request gets its session and cart stores hydrated from the
//! tower-sessions [`Session`] placed in the request extensions by
//! `SessionManagerLayer`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use forkful_core::User;

use crate::services::{CartStore, SessionStore};

/// Per-request session store over the visitor's cookie session.
pub type VisitorSession = SessionStore<Session>;

/// Per-request cart store over the visitor's cookie session.
pub type VisitorCart = CartStore<Session>;

/// Rejection when the session layer is missing from the stack.
#[derive(Debug)]
pub struct MissingSession;

impl IntoResponse for MissingSession {
    fn into_response(self) -> Response {
        tracing::error!("Session extension missing; is SessionManagerLayer installed?");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

fn session(parts: &Parts) -> Result<Session, MissingSession> {
    parts.extensions.get::<Session>().cloned().ok_or(MissingSession)
}

/// Extractor for the hydrated session store.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentSession(mut session): CurrentSession) -> impl IntoResponse {
///     session.logout().await?;
/// }
/// ```
pub struct CurrentSession(pub VisitorSession);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(SessionStore::hydrate(session(parts)?).await))
    }
}

/// Extractor for the visitor's cart.
pub struct CurrentCart(pub VisitorCart);

impl<S> FromRequestParts<S> for CurrentCart
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(CartStore::load(session(parts)?).await))
    }
}

/// Login page URL that returns to `next` afterwards.
#[must_use]
pub fn login_url(next: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("/auth/login?{query}")
}

/// Extractor for the signed-in user, if any.
pub struct OptionalAuth(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::hydrate(session(parts)?).await;
        Ok(Self(store.current_user().cloned()))
    }
}

/// Only same-site absolute paths are accepted as redirect targets.
#[must_use]
pub fn safe_next(next: Option<&str>, fallback: &'static str) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_encodes_next() {
        assert_eq!(login_url("/cart"), "/auth/login?next=%2Fcart");
    }

    #[test]
    fn test_safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(Some("/menu?category=pizza"), "/"), "/menu?category=pizza");
        assert_eq!(safe_next(Some("//evil.example"), "/cart"), "/cart");
        assert_eq!(safe_next(Some("https://evil.example"), "/cart"), "/cart");
        assert_eq!(safe_next(Some("/\\evil.example"), "/cart"), "/cart");
        assert_eq!(safe_next(None, "/cart"), "/cart");
    }
}
