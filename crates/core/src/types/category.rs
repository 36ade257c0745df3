//! Menu categories.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A menu category.
///
/// The menu filter bar offers the five known cuisines. Catalog records
/// carrying any other category still load, as [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pizza,
    Burger,
    Indian,
    Chinese,
    Dessert,
    #[serde(other)]
    Other,
}

impl Category {
    /// Categories shown in the filter bar, in display order.
    pub const MENU: [Self; 5] = [
        Self::Pizza,
        Self::Burger,
        Self::Indian,
        Self::Chinese,
        Self::Dessert,
    ];

    /// Identifier used in URLs and catalog records.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Burger => "burger",
            Self::Indian => "indian",
            Self::Chinese => "chinese",
            Self::Dessert => "dessert",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pizza => "Pizza",
            Self::Burger => "Burger",
            Self::Indian => "Indian",
            Self::Chinese => "Chinese",
            Self::Dessert => "Dessert",
            Self::Other => "Other",
        }
    }

    /// Emoji icon for the filter bar.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Pizza => "🍕",
            Self::Burger => "🍔",
            Self::Indian => "🍛",
            Self::Chinese => "🥡",
            Self::Dessert => "🍰",
            Self::Other => "🍽️",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pizza" => Ok(Self::Pizza),
            "burger" => Ok(Self::Burger),
            "indian" => Ok(Self::Indian),
            "chinese" => Ok(Self::Chinese),
            "dessert" => Ok(Self::Dessert),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown category: {other}")),
        }
    }
}
