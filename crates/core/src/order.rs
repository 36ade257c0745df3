//! Historical orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, OrderStatus, Price};

/// A past order as shown in the order history.
///
/// Read-only: nothing in the storefront creates orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub total: Price,
    pub items: Vec<String>,
}

impl Order {
    /// Item names joined for a one-line summary.
    #[must_use]
    pub fn item_summary(&self) -> String {
        self.items.join(", ")
    }
}
