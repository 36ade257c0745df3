//! The cart state model.
//!
//! A [`Cart`] holds at most one [`CartLine`] per menu item and never a line
//! with quantity zero. Totals are derived on every read.

use serde::{Deserialize, Serialize};

use crate::menu::MenuItem;
use crate::types::{MenuItemId, Price};

/// One distinct menu item and its selected quantity.
///
/// Display fields are a snapshot taken when the item was first added, so
/// the cart keeps rendering even if the catalog changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub description: String,
    pub unit_price: Price,
    pub image: Option<String>,
    quantity: u32,
}

impl CartLine {
    fn from_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            unit_price: item.price,
            image: item.image.clone(),
            quantity: 1,
        }
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// The shopping cart, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartSnapshot", into = "CartSnapshot")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `item`, merging with an existing line.
    pub fn add(&mut self, item: &MenuItem) {
        match self.position(item.id) {
            Some(idx) => {
                if let Some(line) = self.lines.get_mut(idx) {
                    line.quantity = line.quantity.saturating_add(1);
                }
            }
            None => self.lines.push(CartLine::from_item(item)),
        }
    }

    /// Set the quantity of a line; zero or below removes it.
    ///
    /// Does nothing if the item is not in the cart.
    pub fn update_quantity(&mut self, id: MenuItemId, new_quantity: i64) {
        let Some(idx) = self.position(id) else {
            return;
        };
        if new_quantity <= 0 {
            self.lines.remove(idx);
            return;
        }
        if let Some(line) = self.lines.get_mut(idx) {
            line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove the line for `id`, if any.
    pub fn remove(&mut self, id: MenuItemId) {
        self.lines.retain(|line| line.item_id != id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == id)
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn position(&self, id: MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == id)
    }
}

/// Wire form of a cart.
///
/// Deserializing goes through here so that a stored snapshot can never
/// produce duplicate lines or zero quantities.
#[derive(Serialize, Deserialize)]
struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        let mut cart = Self::new();
        for line in snapshot.lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(line.item_id) {
                Some(idx) => {
                    if let Some(existing) = cart.lines.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl From<Cart> for CartSnapshot {
    fn from(cart: Cart) -> Self {
        Self { lines: cart.lines }
    }
}
