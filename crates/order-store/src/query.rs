use crate::{Order, OrderId, Sku, SkuCode};

/// Builder for constructing order queries.
///
/// The store performs no indexing; every query is a scan over all
/// stored records, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Filter by order ID.
    pub order_id: Option<OrderId>,

    /// Filter to orders with a line for this SKU.
    pub sku_code: Option<SkuCode>,

    /// Maximum number of orders to return.
    pub limit: Option<usize>,

    /// Number of orders to skip.
    pub offset: Option<usize>,
}

impl OrderQuery {
    /// Creates a new empty query matching every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for a specific order.
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            order_id: Some(order_id),
            ..Default::default()
        }
    }

    /// Filters by order ID.
    pub fn order_id(mut self, id: OrderId) -> Self {
        self.order_id = Some(id);
        self
    }

    /// Filters to orders containing the given SKU.
    pub fn containing_sku(mut self, code: impl Into<SkuCode>) -> Self {
        self.sku_code = Some(code.into());
        self
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips a number of results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if the order satisfies every filter.
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(id) = self.order_id
            && order.id != id
        {
            return false;
        }
        if let Some(ref code) = self.sku_code
            && !order.contains_sku(code)
        {
            return false;
        }
        true
    }

    /// Runs the query over a slice of stored orders.
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        let matching = orders
            .iter()
            .filter(|order| self.matches(order))
            .skip(self.offset.unwrap_or(0));

        match self.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }
}

/// Catalog lookup.
#[derive(Debug, Clone, Default)]
pub struct SkuQuery {
    /// Filter by SKU code.
    pub code: Option<SkuCode>,
}

impl SkuQuery {
    /// Creates a query matching the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for a single SKU code.
    pub fn for_code(code: impl Into<SkuCode>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    pub fn matches(&self, sku: &Sku) -> bool {
        self.code.as_ref().is_none_or(|code| &sku.code == code)
    }

    pub fn apply(&self, catalog: &[Sku]) -> Vec<Sku> {
        catalog
            .iter()
            .filter(|sku| self.matches(sku))
            .cloned()
            .collect()
    }
}
