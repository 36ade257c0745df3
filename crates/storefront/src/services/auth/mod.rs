//! Authentication and the per-visitor session store.
//!
//! [`SessionStore`] is the state holder for "who is signed in". It starts in
//! [`SessionState::Loading`], hydrates from durable storage, and moves
//! between `Unauthenticated` and `Authenticated` through `login`,
//! `register` and `logout`. Credentials are checked by an
//! [`Authenticator`]: the built-in demo rules, or a remote service.

mod demo;
mod error;
mod remote;

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use forkful_core::User;

pub use demo::DemoAuthenticator;
pub use error::AuthError;
pub use remote::RemoteAuthenticator;

use crate::storage::{KeyValueStore, StorageError, keys, load_json, store_json};

/// A successful authentication: who, plus the tokens to persist.
pub struct AuthGrant {
    pub user: User,
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
}

impl std::fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGrant")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Sign-up form input.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Checks credentials and issues grants.
pub trait Authenticator: Send + Sync {
    /// Authenticate an existing account.
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<AuthGrant, AuthError>> + Send;

    /// Create an account and authenticate it.
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<AuthGrant, AuthError>> + Send;
}

/// The authenticator selected by configuration.
#[derive(Debug, Clone)]
pub enum AuthBackend {
    Demo(DemoAuthenticator),
    Remote(RemoteAuthenticator),
}

impl Authenticator for AuthBackend {
    async fn login(&self, email: &str, password: &SecretString) -> Result<AuthGrant, AuthError> {
        match self {
            Self::Demo(demo) => demo.login(email, password).await,
            Self::Remote(remote) => remote.login(email, password).await,
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, AuthError> {
        match self {
            Self::Demo(demo) => demo.register(registration).await,
            Self::Remote(remote) => remote.register(registration).await,
        }
    }
}

/// Authentication state of a browsing context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Durable storage has not been consulted yet.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(User),
}

/// Session state machine over a storage backend.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    state: SessionState,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a store that has not yet read storage.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            state: SessionState::Loading,
        }
    }

    /// Create a store and hydrate it immediately.
    pub async fn hydrate(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.reload().await;
        store
    }

    /// Re-read the session from storage.
    ///
    /// Authenticated only if both a decodable user record and an access
    /// token are present; anything else is a signed-out session.
    pub async fn reload(&mut self) {
        let user: Option<User> = load_json(&self.storage, keys::USER).await;
        let has_token = matches!(self.storage.get(keys::ACCESS_TOKEN).await, Ok(Some(_)));

        self.state = match user {
            Some(user) if has_token => SessionState::Authenticated(user),
            _ => SessionState::Unauthenticated,
        };
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// Returns the authenticator's error unchanged, leaving the state as it
    /// was, or `AuthError::Storage` if the session could not be persisted.
    #[instrument(skip(self, authenticator, password))]
    pub async fn login<A: Authenticator>(
        &mut self,
        authenticator: &A,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError> {
        let grant = authenticator.login(email, password).await?;
        self.establish(grant).await
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Same contract as [`SessionStore::login`].
    #[instrument(skip(self, authenticator, registration), fields(email = %registration.email))]
    pub async fn register<A: Authenticator>(
        &mut self,
        authenticator: &A,
        registration: &Registration,
    ) -> Result<User, AuthError> {
        let grant = authenticator.register(registration).await?;
        self.establish(grant).await
    }

    /// Sign out and clear the stored session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored entries could not be removed.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.state = SessionState::Unauthenticated;
        self.storage.remove(keys::USER).await?;
        self.storage.remove(keys::ACCESS_TOKEN).await?;
        self.storage.remove(keys::REFRESH_TOKEN).await?;
        Ok(())
    }

    /// Persist a grant, then switch to `Authenticated`.
    ///
    /// The user record is written last: until it lands, storage never pairs
    /// a user with someone else's tokens.
    async fn establish(&mut self, grant: AuthGrant) -> Result<User, AuthError> {
        self.storage.remove(keys::USER).await?;
        self.storage
            .set(keys::ACCESS_TOKEN, grant.access_token.expose_secret().to_owned())
            .await?;
        match &grant.refresh_token {
            Some(token) => {
                self.storage
                    .set(keys::REFRESH_TOKEN, token.expose_secret().to_owned())
                    .await?;
            }
            None => self.storage.remove(keys::REFRESH_TOKEN).await?,
        }
        store_json(&self.storage, keys::USER, &grant.user).await?;

        tracing::info!(user_id = %grant.user.id, "Session established");
        self.state = SessionState::Authenticated(grant.user.clone());
        Ok(grant.user)
    }
}
