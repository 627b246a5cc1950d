//! Fixed demo data shipped with the temporary stores.

use crate::{LineId, Order, OrderId, OrderLine, Sku};

/// The product catalog.
pub fn demo_catalog() -> Vec<Sku> {
    vec![
        Sku::new("A1", "Product A1"),
        Sku::new("A2", "Product A2"),
        Sku::new("A3", "Product A3"),
        Sku::new("B1", "Product B1"),
    ]
}

/// Orders written to a fresh data file.
pub fn demo_orders() -> Vec<Order> {
    let line = |id: u32, code: &str, quantity: u32, sort_order: i32| {
        OrderLine::new(Sku::new(code, format!("Product {code}")), quantity)
            .with_id(LineId::new(id))
            .with_sort_order(sort_order)
    };

    vec![
        Order::new(
            OrderId::new(1),
            vec![line(1, "A1", 2, 10), line(2, "A2", 4, 20), line(3, "B1", 8, 30)],
        ),
        Order::new(
            OrderId::new(2),
            vec![line(4, "A3", 3, 10), line(5, "B1", 5, 20)],
        ),
    ]
}
