//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Session store and authenticators (demo rules or remote service)
//! - `cart` - Cart persisted to the visitor's storage
//! - `checkout` - Pricing the cart and clearing it on order
//! - `orders` - Demo order history

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;

pub use auth::{AuthBackend, AuthError, Authenticator, Registration, SessionState, SessionStore};
pub use cart::CartStore;
pub use checkout::{CheckoutError, CheckoutReceipt, checkout};
