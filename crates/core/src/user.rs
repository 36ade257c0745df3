//! Authenticated user profile.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// The user a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name shown in the navigation bar.
    pub name: String,
    pub email: Email,
}
