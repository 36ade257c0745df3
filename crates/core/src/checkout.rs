//! Checkout summary derived from cart totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::Price;

/// Fees applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Charged once per order when the cart is non-empty.
    pub delivery_fee: Price,
    /// Fraction of the subtotal, e.g. `0.08` for 8%.
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            delivery_fee: Price::from_cents(299),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

/// What an order costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub tax: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Price a cart under `policy`.
    ///
    /// An empty cart costs nothing: no delivery fee, no tax.
    #[must_use]
    pub fn for_cart(cart: &Cart, policy: &PricingPolicy) -> Self {
        let subtotal = cart.total_price();
        let delivery_fee = if cart.is_empty() {
            Price::ZERO
        } else {
            policy.delivery_fee
        };
        let tax = subtotal.scaled(policy.tax_rate);

        Self {
            item_count: cart.total_items(),
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::fixtures::item;
    use crate::types::Category;

    #[test]
    fn test_empty_cart_costs_nothing() {
        let summary = CheckoutSummary::for_cart(&Cart::new(), &PricingPolicy::default());
        assert_eq!(summary.subtotal, Price::ZERO);
        assert_eq!(summary.delivery_fee, Price::ZERO);
        assert_eq!(summary.tax, Price::ZERO);
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn test_fee_and_tax_are_added() {
        let mut cart = Cart::new();
        let tenner = item(9, "Thali", Category::Indian, 1000);
        cart.add(&tenner);
        cart.add(&tenner);

        let summary = CheckoutSummary::for_cart(&cart, &PricingPolicy::default());
        assert_eq!(summary.subtotal, Price::from_cents(2000));
        assert_eq!(summary.delivery_fee, Price::from_cents(299));
        assert_eq!(summary.tax, Price::from_cents(160));
        assert_eq!(summary.total, Price::from_cents(2459));
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_custom_policy() {
        let mut cart = Cart::new();
        cart.add(&item(1, "Noodles", Category::Chinese, 850));
        let policy = PricingPolicy {
            delivery_fee: Price::ZERO,
            tax_rate: Decimal::ZERO,
        };

        let summary = CheckoutSummary::for_cart(&cart, &policy);
        assert_eq!(summary.total, Price::from_cents(850));
    }
}
