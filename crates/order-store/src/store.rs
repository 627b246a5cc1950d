use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    LineId, NewOrder, Order, OrderId, OrderLine, OrderQuery, OrderStoreError, Result, Sku,
    SkuCode, SkuQuery,
};

/// Gap left between consecutive sort orders handed out by the store.
pub const SORT_ORDER_STEP: i32 = 10;

/// Core trait for order store implementations.
///
/// Stores offer no transactions: each call reads or rewrites whole
/// records, and callers compose read-validate-write sequences on top.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Retrieves every stored order matching the query.
    ///
    /// Duplicate records are returned as-is so callers can detect them.
    async fn find_orders(&self, query: OrderQuery) -> Result<Vec<Order>>;

    /// Retrieves catalog entries matching the query.
    async fn find_skus(&self, query: SkuQuery) -> Result<Vec<Sku>>;

    /// Persists a new order, assigning its ID and the IDs of its lines.
    ///
    /// Returns the order as stored.
    async fn create_order(&self, order: NewOrder) -> Result<Order>;

    /// Replaces an existing order, assigning IDs to any unsaved lines.
    ///
    /// Fails with `OrderNotFound` if no record carries the order's ID.
    async fn save_order(&self, order: Order) -> Result<Order>;
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Retrieves every stored order.
    async fn all_orders(&self) -> Result<Vec<Order>> {
        self.find_orders(OrderQuery::new()).await
    }

    /// Retrieves every record stored under the given ID.
    async fn orders_with_id(&self, order_id: OrderId) -> Result<Vec<Order>> {
        self.find_orders(OrderQuery::for_order(order_id)).await
    }

    /// Retrieves the whole catalog.
    async fn all_skus(&self) -> Result<Vec<Sku>> {
        self.find_skus(SkuQuery::new()).await
    }

    /// Retrieves every catalog entry with the given code.
    async fn skus_with_code(&self, code: &SkuCode) -> Result<Vec<Sku>> {
        self.find_skus(SkuQuery::for_code(code.clone())).await
    }
}

// Blanket implementation for all OrderStore implementations
impl<T: OrderStore + ?Sized> OrderStoreExt for T {}

/// Everything a store persists: the order records plus the highest line
/// ID ever handed out.
///
/// The high-water mark survives deletes, so a removed line's ID is never
/// given to a new line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecords {
    #[serde(default)]
    pub last_line_id: Option<LineId>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl OrderRecords {
    /// Wraps existing orders, starting the high-water mark at their
    /// highest line ID.
    pub fn new(orders: Vec<Order>) -> Self {
        let last_line_id = highest_line_id(&orders);
        Self {
            last_line_id,
            orders,
        }
    }

    /// Returns the ID the next created order should receive.
    pub fn next_order_id(&self) -> Result<OrderId> {
        match self.orders.iter().map(|order| order.id).max() {
            None => Ok(OrderId::new(1)),
            Some(id) => id
                .next()
                .ok_or(OrderStoreError::IdentityExhausted("order ID")),
        }
    }

    /// Fills in IDs and sort orders for unsaved lines.
    ///
    /// Line IDs continue from the high-water mark, the stored lines and the
    /// incoming lines, whichever is highest. Sort orders continue from the
    /// highest sort order within the incoming lines.
    pub fn assign_line_identity(&mut self, lines: &mut [OrderLine]) -> Result<()> {
        let mut last_id = highest_line_id(&self.orders)
            .max(lines.iter().filter_map(|line| line.id).max())
            .max(self.last_line_id);
        let mut last_sort = lines.iter().filter_map(|line| line.sort_order).max();

        for line in lines.iter_mut() {
            if line.id.is_none() {
                let id = match last_id {
                    None => LineId::new(1),
                    Some(id) => id
                        .next()
                        .ok_or(OrderStoreError::IdentityExhausted("line ID"))?,
                };
                line.id = Some(id);
                last_id = Some(id);
            }
            if line.sort_order.is_none() {
                let sort = match last_sort {
                    None => SORT_ORDER_STEP,
                    Some(sort) => sort
                        .checked_add(SORT_ORDER_STEP)
                        .ok_or(OrderStoreError::IdentityExhausted("sort order"))?,
                };
                line.sort_order = Some(sort);
                last_sort = Some(sort);
            }
        }

        self.last_line_id = last_id;
        Ok(())
    }

    /// Appends a new order to the stored records.
    pub(crate) fn insert(&mut self, order: NewOrder) -> Result<Order> {
        let mut lines = order.lines;
        let id = self.next_order_id()?;
        self.assign_line_identity(&mut lines)?;

        let created = Order::new(id, lines);
        self.orders.push(created.clone());
        Ok(created)
    }

    /// Overwrites every stored record carrying the order's ID.
    pub(crate) fn replace(&mut self, mut order: Order) -> Result<Order> {
        if !self.orders.iter().any(|existing| existing.id == order.id) {
            return Err(OrderStoreError::OrderNotFound(order.id));
        }

        self.assign_line_identity(&mut order.lines)?;

        for existing in self.orders.iter_mut().filter(|existing| existing.id == order.id) {
            *existing = order.clone();
        }
        Ok(order)
    }
}

fn highest_line_id(orders: &[Order]) -> Option<LineId> {
    orders
        .iter()
        .flat_map(|order| order.lines.iter())
        .filter_map(|line| line.id)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(code: &str) -> OrderLine {
        OrderLine::new(Sku::new(code, format!("Product {code}")), 1)
    }

    #[test]
    fn next_order_id_starts_at_one() {
        assert_eq!(
            OrderRecords::default().next_order_id().unwrap(),
            OrderId::new(1)
        );
    }

    #[test]
    fn next_order_id_follows_highest() {
        let records = OrderRecords::new(vec![
            Order::new(OrderId::new(4), vec![]),
            Order::new(OrderId::new(2), vec![]),
        ]);
        assert_eq!(records.next_order_id().unwrap(), OrderId::new(5));
    }

    #[test]
    fn next_order_id_fails_at_u32_max() {
        let records = OrderRecords::new(vec![Order::new(OrderId::new(u32::MAX), vec![])]);
        assert!(matches!(
            records.next_order_id(),
            Err(OrderStoreError::IdentityExhausted(_))
        ));
    }

    #[test]
    fn assigns_line_ids_across_all_orders() {
        let mut records = OrderRecords::new(vec![Order::new(
            OrderId::new(1),
            vec![line("A1").with_id(LineId::new(7)).with_sort_order(10)],
        )]);
        let mut lines = vec![line("A2"), line("A3")];

        records.assign_line_identity(&mut lines).unwrap();

        assert_eq!(lines[0].id, Some(LineId::new(8)));
        assert_eq!(lines[1].id, Some(LineId::new(9)));
        assert_eq!(lines[0].sort_order, Some(10));
        assert_eq!(lines[1].sort_order, Some(20));
        assert_eq!(records.last_line_id, Some(LineId::new(9)));
    }

    #[test]
    fn keeps_existing_ids_and_sort_orders() {
        let mut lines = vec![
            line("A1").with_id(LineId::new(3)).with_sort_order(30),
            line("B1"),
        ];

        OrderRecords::default()
            .assign_line_identity(&mut lines)
            .unwrap();

        assert_eq!(lines[0].id, Some(LineId::new(3)));
        assert_eq!(lines[0].sort_order, Some(30));
        assert_eq!(lines[1].id, Some(LineId::new(4)));
        assert_eq!(lines[1].sort_order, Some(40));
    }

    #[test]
    fn deleted_line_ids_are_not_reused() {
        let mut records = OrderRecords::new(vec![Order::new(
            OrderId::new(1),
            vec![line("A1").with_id(LineId::new(1)).with_sort_order(10)],
        )]);

        records.replace(Order::new(OrderId::new(1), vec![])).unwrap();
        let saved = records
            .replace(Order::new(OrderId::new(1), vec![line("A1")]))
            .unwrap();

        assert_eq!(saved.lines[0].id, Some(LineId::new(2)));
    }

    #[test]
    fn sort_order_overflow_is_an_error() {
        let mut lines = vec![line("A1").with_sort_order(i32::MAX), line("A2")];

        let result = OrderRecords::default().assign_line_identity(&mut lines);

        assert!(matches!(
            result,
            Err(OrderStoreError::IdentityExhausted("sort order"))
        ));
    }

    #[test]
    fn line_id_overflow_is_an_error() {
        let mut records = OrderRecords {
            last_line_id: Some(LineId::new(u32::MAX)),
            orders: vec![],
        };
        let before = records.clone();

        let result = records.assign_line_identity(&mut [line("A1")]);

        assert!(matches!(
            result,
            Err(OrderStoreError::IdentityExhausted("line ID"))
        ));
        assert_eq!(records, before);
    }

    #[test]
    fn replace_order_rejects_unknown_id() {
        let mut records = OrderRecords::new(vec![Order::new(OrderId::new(1), vec![])]);
        let result = records.replace(Order::new(OrderId::new(2), vec![]));
        assert!(matches!(result, Err(OrderStoreError::OrderNotFound(id)) if id == OrderId::new(2)));
    }

    #[test]
    fn replace_order_overwrites_every_duplicate() {
        let mut records = OrderRecords::new(vec![
            Order::new(OrderId::new(1), vec![]),
            Order::new(OrderId::new(1), vec![]),
        ]);
        let saved = records
            .replace(Order::new(OrderId::new(1), vec![line("A1")]))
            .unwrap();

        assert_eq!(saved.lines[0].id, Some(LineId::new(1)));
        assert!(records.orders.iter().all(|order| order.line_count() == 1));
    }

    #[test]
    fn records_serialize_with_high_water_mark() {
        let records = OrderRecords {
            last_line_id: Some(LineId::new(12)),
            orders: vec![],
        };

        let json = serde_json::to_value(&records).unwrap();

        assert_eq!(json["lastLineId"], 12);
        assert_eq!(json["orders"], serde_json::json!([]));
    }
}
