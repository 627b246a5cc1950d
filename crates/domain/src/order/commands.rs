//! Caller-supplied inputs to the order service.

use common::{LineId, SkuCode};
use order_store::{OrderLine, Sku};

/// An order line as supplied by a caller.
///
/// A line whose `id` matches an existing line updates that line; any
/// other line is treated as new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineInput {
    pub id: Option<LineId>,
    pub sku_code: SkuCode,
    pub quantity: u32,
    pub sort_order: Option<i32>,
}

impl OrderLineInput {
    /// Creates input for a new line.
    pub fn new(sku_code: impl Into<SkuCode>, quantity: u32) -> Self {
        Self {
            id: None,
            sku_code: sku_code.into(),
            quantity,
            sort_order: None,
        }
    }

    /// Creates input targeting an existing line.
    pub fn existing(id: LineId, sku_code: impl Into<SkuCode>, quantity: u32) -> Self {
        Self {
            id: Some(id),
            ..Self::new(sku_code, quantity)
        }
    }

    /// Sets the display sort order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Builds an unsaved line against a resolved catalog entry.
    ///
    /// The caller's line ID is dropped; the store assigns a fresh one.
    pub(crate) fn into_new_line(self, sku: Sku) -> OrderLine {
        OrderLine {
            id: None,
            sku,
            quantity: self.quantity,
            sort_order: self.sort_order,
        }
    }
}

/// Create a new order, optionally with lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOrder {
    pub lines: Vec<OrderLineInput>,
}

impl CreateOrder {
    /// Creates a command for an order with the given lines.
    pub fn with_lines(lines: Vec<OrderLineInput>) -> Self {
        Self { lines }
    }
}
