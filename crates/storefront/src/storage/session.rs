//! tower-sessions backend.
//!
//! Each visitor's session (keyed by the session cookie) acts as that
//! browsing context's durable storage. Values are stored as JSON strings.

use tower_sessions::Session;

use super::{KeyValueStore, StorageError};

impl KeyValueStore for Session {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(Session::get::<String>(self, key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        Ok(Session::insert(self, key, value).await?)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Session::remove::<serde_json::Value>(self, key).await?;
        Ok(())
    }
}
