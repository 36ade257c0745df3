//! Demo order history.
//!
//! There is no order backend; signed-in visitors see the same two
//! delivered orders.

use chrono::NaiveDate;

use forkful_core::{Order, OrderId, OrderStatus, Price};
use rust_decimal::Decimal;

/// The fixed order history shown on the orders page, newest first.
#[must_use]
pub fn demo_history() -> Vec<Order> {
    let mut orders: Vec<Order> = [
        (
            1,
            (2024, 1, 15),
            4297,
            &["Margherita Pizza", "Double Bacon Burger", "Chocolate Lava Cake"][..],
        ),
        (2, (2024, 1, 10), 2848, &["Butter Chicken", "Vegetable Fried Rice"][..]),
    ]
    .into_iter()
    .filter_map(|(id, (y, m, d), cents, items)| {
        Some(Order {
            id: OrderId::new(id),
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            status: OrderStatus::Delivered,
            total: Price::new(Decimal::new(cents, 2)).ok()?,
            items: items.iter().map(ToString::to_string).collect(),
        })
    })
    .collect();

    orders.sort_by(|a, b| b.date.cmp(&a.date));
    orders
}
