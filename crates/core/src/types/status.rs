//! Order status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Where an order is in its lifecycle.
///
/// The closed set the order history understands. The legacy value
/// `pending` is accepted as an alias for [`OrderStatus::Placed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "pending")]
    Placed,
    Preparing,
    Delivered,
}

impl OrderStatus {
    /// Label shown in the order history.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Preparing => "Preparing",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed => write!(f, "placed"),
            Self::Preparing => write!(f, "preparing"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}
