//! Persistent cart store.
//!
//! Wraps a [`Cart`] with the storage it is snapshotted to. Every mutation
//! writes the snapshot back, so a cart survives across requests for the
//! same browsing context.

use forkful_core::{Cart, MenuItem, MenuItemId};
use tracing::instrument;

use crate::storage::{KeyValueStore, StorageError, keys, load_json, store_json};

/// A cart bound to its storage.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the stored cart. A missing or unreadable snapshot is an empty
    /// cart.
    pub async fn load(storage: S) -> Self {
        let cart = load_json(&storage, keys::CART).await.unwrap_or_default();
        Self { storage, cart }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one of `item`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add(&mut self, item: &MenuItem) -> Result<(), StorageError> {
        self.cart.add(item);
        self.save().await
    }

    /// Set a line's quantity; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &mut self,
        id: MenuItemId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        self.cart.update_quantity(id, quantity);
        self.save().await
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: MenuItemId) -> Result<(), StorageError> {
        self.cart.remove(id);
        self.save().await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot could not be written.
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.cart.clear();
        self.save().await
    }

    async fn save(&self) -> Result<(), StorageError> {
        store_json(&self.storage, keys::CART, &self.cart).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forkful_core::{Category, Price};

    use super::*;
    use crate::storage::MemoryStorage;

    fn pizza() -> MenuItem {
        MenuItem {
            id: MenuItemId::new(1),
            name: "Margherita Pizza".to_string(),
            description: "Tomato, mozzarella, basil".to_string(),
            price: Price::from_cents(1299),
            image: None,
            category: Category::Pizza,
            available: true,
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::load(storage.clone()).await;
        assert!(store.cart().is_empty());

        store.add(&pizza()).await.unwrap();
        store.add(&pizza()).await.unwrap();
        assert!(storage.contains(keys::CART));

        let reloaded = CartStore::load(storage.clone()).await;
        assert_eq!(reloaded.cart().len(), 1);
        assert_eq!(reloaded.cart().total_items(), 2);
        assert_eq!(reloaded.cart().total_price(), Price::from_cents(2598));
    }

    #[tokio::test]
    async fn test_update_to_negative_removes_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::load(storage.clone()).await;
        store.add(&pizza()).await.unwrap();

        store.update_quantity(MenuItemId::new(1), -1).await.unwrap();
        let reloaded = CartStore::load(storage).await;
        assert!(reloaded.cart().is_empty());
    }

    #[tokio::test]
    async fn test_clear_persists_empty_cart() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::load(storage.clone()).await;
        store.add(&pizza()).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(CartStore::load(storage).await.cart().total_items(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_loads_empty() {
        let storage = MemoryStorage::new().with_entry(keys::CART, "not json");
        let store = CartStore::load(storage).await;
        assert!(store.cart().is_empty());
    }
}
