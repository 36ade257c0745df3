//! Authentication route handlers.
//!
//! Login and registration go through the visitor's [`SessionStore`]
//! (`crate::services::SessionStore`). Validation failures re-render the form
//! with the message; they never change the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use super::LayoutView;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{CurrentCart, CurrentSession, OptionalAuth, VisitorCart, safe_next};
use crate::services::{AuthError, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

/// Query parameters for the auth pages.
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: LayoutView,
    pub error: Option<String>,
    pub email: String,
    pub next: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: LayoutView,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub next: String,
}

/// Turn a recoverable auth failure into the re-rendered form; propagate the
/// rest.
fn form_error(err: AuthError) -> Result<String> {
    match err {
        AuthError::Storage(e) => Err(AppError::Storage(e)),
        AuthError::Unavailable(ref detail) => {
            tracing::error!(%detail, "Authentication service unavailable");
            Ok(err.user_message())
        }
        other => {
            tracing::info!(error = %other, "Authentication rejected");
            Ok(other.user_message())
        }
    }
}

fn guest_layout(cart: &VisitorCart) -> LayoutView {
    LayoutView::new(None, cart.cart())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page. Signed-in visitors go straight to `next`.
#[instrument(skip_all)]
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    CurrentCart(cart): CurrentCart,
    Query(query): Query<AuthQuery>,
) -> Response {
    let next = safe_next(query.next.as_deref(), "/");
    if user.is_some() {
        return Redirect::to(&next).into_response();
    }

    LoginTemplate {
        layout: guest_layout(&cart),
        error: None,
        email: String::new(),
        next,
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
    CurrentCart(cart): CurrentCart,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next = safe_next(form.next.as_deref(), "/");
    let password = SecretString::from(form.password);

    match session.login(state.auth(), &form.email, &password).await {
        Ok(user) => {
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Ok(Redirect::to(&next).into_response())
        }
        Err(e) => {
            let message = form_error(e)?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                LoginTemplate {
                    layout: guest_layout(&cart),
                    error: Some(message),
                    email: form.email,
                    next,
                },
            )
                .into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
#[instrument(skip_all)]
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    CurrentCart(cart): CurrentCart,
    Query(query): Query<AuthQuery>,
) -> Response {
    let next = safe_next(query.next.as_deref(), "/");
    if user.is_some() {
        return Redirect::to(&next).into_response();
    }

    RegisterTemplate {
        layout: guest_layout(&cart),
        error: None,
        name: String::new(),
        email: String::new(),
        next,
    }
    .into_response()
}

/// Handle registration form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
    CurrentCart(cart): CurrentCart,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let next = safe_next(form.next.as_deref(), "/");
    let registration = Registration {
        name: form.name,
        email: form.email,
        password: SecretString::from(form.password),
    };

    match session.register(state.auth(), &registration).await {
        Ok(user) => {
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Ok(Redirect::to(&next).into_response())
        }
        Err(e) => {
            let message = form_error(e)?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                RegisterTemplate {
                    layout: guest_layout(&cart),
                    error: Some(message),
                    name: registration.name,
                    email: registration.email,
                    next,
                },
            )
                .into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out. The cart is kept.
#[instrument(skip_all)]
pub async fn logout(CurrentSession(mut session): CurrentSession) -> Result<Response> {
    session.logout().await?;
    clear_sentry_user();
    Ok(Redirect::to("/").into_response())
}
