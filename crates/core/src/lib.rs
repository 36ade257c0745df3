//! Forkful Core - Domain types and state models.
//!
//! This crate provides the types shared by the Forkful storefront and its
//! test harness:
//! - `storefront` - Server-rendered menu, cart, checkout and account pages
//! - `integration-tests` - End-to-end tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage, no HTTP clients. Persisting a [`Cart`] or resolving a
//! [`User`] from credentials is the storefront's job.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, categories and statuses
//! - [`menu`] - Menu items and menu filtering
//! - [`cart`] - The cart state model (quantity merging, totals)
//! - [`checkout`] - Checkout summary derived from cart totals
//! - [`order`] - Historical orders
//! - [`user`] - Authenticated user profile

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod order;
pub mod types;
pub mod user;

pub use cart::{Cart, CartLine};
pub use checkout::{CheckoutSummary, PricingPolicy};
pub use menu::{CategoryFilter, MenuItem, MenuQuery};
pub use order::Order;
pub use types::*;
pub use user::User;
