//! Client for a remote authentication service.
//!
//! Speaks the JSON API of the ordering backend:
//!
//! - `POST {base}/auth/login/` with `{email, password}`
//! - `POST {base}/auth/register/` with `{username, email, password, password2}`
//!
//! Both answer `{user, tokens: {access, refresh}}` on success. Error bodies
//! carry either a `detail` string or a map of field name to messages.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use forkful_core::{Email, User, UserId};

use super::{AuthError, AuthGrant, Authenticator, Registration};

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    password2: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: RemoteUser,
    tokens: TokenPair,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: i64,
    email: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Deserialize)]
struct TokenPair {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair").finish_non_exhaustive()
    }
}

impl RemoteUser {
    /// Full name when the service has one, else username, else the email's
    /// local part.
    fn display_name(&self, email: &Email) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| email.local_part().to_string(), ToString::to_string)
    }
}

impl TryFrom<AuthResponse> for AuthGrant {
    type Error = AuthError;

    fn try_from(response: AuthResponse) -> Result<Self, Self::Error> {
        let email = Email::parse(&response.user.email)
            .map_err(|e| AuthError::Unavailable(format!("service returned bad email: {e}")))?;
        let name = response.user.display_name(&email);

        Ok(Self {
            user: User {
                id: UserId::new(response.user.id),
                name,
                email,
            },
            access_token: SecretString::from(response.tokens.access),
            refresh_token: response.tokens.refresh.map(SecretString::from),
        })
    }
}

/// Pull a human-readable message out of an error body.
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            "Request failed".to_string()
        } else {
            trimmed.to_string()
        };
    };

    if let Some(detail) = value.get("detail").and_then(serde_json::Value::as_str) {
        return detail.to_string();
    }

    // Field errors: {"password": ["Password fields didn't match."]}
    if let Some(fields) = value.as_object() {
        for messages in fields.values() {
            let first = match messages {
                serde_json::Value::String(s) => Some(s.as_str()),
                serde_json::Value::Array(list) => {
                    list.first().and_then(serde_json::Value::as_str)
                }
                _ => None,
            };
            if let Some(message) = first {
                return message.to_string();
            }
        }
    }

    value.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Authenticator backed by a remote HTTP service.
#[derive(Debug, Clone)]
pub struct RemoteAuthenticator {
    inner: Arc<RemoteInner>,
}

#[derive(Debug)]
struct RemoteInner {
    client: reqwest::Client,
    base: Url,
}

impl RemoteAuthenticator {
    /// Create a client for the service rooted at `base`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Create a client with a preconfigured `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, mut base: Url) -> Self {
        // Url::join drops the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            inner: Arc::new(RemoteInner { client, base }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.inner
            .base
            .join(path)
            .map_err(|e| AuthError::Unavailable(format!("invalid endpoint {path}: {e}")))
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<AuthGrant, AuthError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "Authentication service rejected request");
            return if status.is_client_error() {
                Err(AuthError::Rejected(error_detail(&text)))
            } else {
                Err(AuthError::Unavailable(format!("{status}: {text}")))
            };
        }

        let body: AuthResponse = response.json().await?;
        AuthGrant::try_from(body)
    }
}

impl Authenticator for RemoteAuthenticator {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &SecretString) -> Result<AuthGrant, AuthError> {
        self.post(
            "auth/login/",
            &LoginRequest {
                email: email.trim(),
                password: password.expose_secret(),
            },
        )
        .await
    }

    #[tracing::instrument(skip(self, registration), fields(email = %registration.email))]
    async fn register(&self, registration: &Registration) -> Result<AuthGrant, AuthError> {
        let password = registration.password.expose_secret();
        self.post(
            "auth/register/",
            &RegisterRequest {
                username: registration.name.trim(),
                email: registration.email.trim(),
                password,
                password2: password,
            },
        )
        .await
    }
}
