//! Durable key-value storage port.
//!
//! Everything a browsing context persists (the signed-in user, auth tokens,
//! the cart snapshot) goes through [`KeyValueStore`]: string values under
//! fixed keys. In production the store is the visitor's cookie-keyed
//! tower-sessions [`Session`](tower_sessions::Session); tests use
//! [`MemoryStorage`].
//!
//! Stored records are JSON. A record that fails to parse is treated as
//! absent, never as an error.

mod memory;
mod session;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use memory::MemoryStorage;

/// Fixed storage keys.
pub mod keys {
    /// JSON-encoded signed-in user.
    pub const USER: &str = "user";

    /// Access token issued by the authentication collaborator.
    pub const ACCESS_TOKEN: &str = "access_token";

    /// Refresh token, when the collaborator issues one.
    pub const REFRESH_TOKEN: &str = "refresh_token";

    /// JSON-encoded cart snapshot.
    pub const CART: &str = "cart";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The session backend failed to load or save.
    #[error("session storage error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A value could not be encoded for storage.
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store scoped to one browsing context.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Read and decode a JSON record.
///
/// Missing keys, backend read failures and undecodable records all come back
/// as `None`; the latter two are logged.
pub async fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let raw = match store.get(key).await {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored record, treating as absent");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored record");
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub async fn store_json<S, T>(store: &S, key: &'static str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize + Sync,
{
    let encoded =
        serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;
    store.set(key, encoded).await
}
