//! Session middleware configuration.
//!
//! Each browsing context gets a cookie-keyed tower-sessions session. The
//! session is the visitor's durable key-value storage: the stores in
//! `services` read and write it through [`KeyValueStore`](crate::storage::KeyValueStore).

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "forkful_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound on sessions held in memory; least recently used go first.
const MAX_SESSIONS: u64 = 100_000;

/// In-process session store.
///
/// Records are evicted once their expiry date passes, so abandoned
/// sessions do not accumulate. Sessions do not survive a restart.
#[must_use]
pub fn session_store() -> MokaStore {
    MokaStore::new(Some(MAX_SESSIONS))
}

/// Create the session layer.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
