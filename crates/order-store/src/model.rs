//! Persistence models for orders, order lines and SKUs.

use serde::{Deserialize, Serialize};

use crate::{LineId, OrderId, SkuCode};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub code: SkuCode,
    pub display_name: String,
}

impl Sku {
    pub fn new(code: impl Into<SkuCode>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

/// A single SKU + quantity entry within an order.
///
/// `id` and `sort_order` are `None` until the line has been persisted;
/// the store fills both in on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub id: Option<LineId>,
    pub sku: Sku,
    pub quantity: u32,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl OrderLine {
    /// Creates an unsaved line.
    pub fn new(sku: Sku, quantity: u32) -> Self {
        Self {
            id: None,
            sku,
            quantity,
            sort_order: None,
        }
    }

    /// Sets the line ID.
    pub fn with_id(mut self, id: LineId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the display sort order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Returns true if this line has been persisted under `id`.
    pub fn has_id(&self, id: LineId) -> bool {
        self.id == Some(id)
    }
}

/// An order that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    /// Creates an order with no lines.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an order with the given lines.
    pub fn with_lines(lines: Vec<OrderLine>) -> Self {
        Self { lines }
    }
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(id: OrderId, lines: Vec<OrderLine>) -> Self {
        Self { id, lines }
    }

    /// Returns true if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns every line persisted under `id`.
    ///
    /// More than one result means the stored record is corrupt.
    pub fn lines_with_id(&self, id: LineId) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter().filter(move |line| line.has_id(id))
    }

    /// Returns the line for the given SKU code, if any.
    pub fn line_for_sku(&self, code: &SkuCode) -> Option<&OrderLine> {
        self.lines.iter().find(|line| &line.sku.code == code)
    }

    /// Returns true if a line already references the given SKU code.
    pub fn contains_sku(&self, code: &SkuCode) -> bool {
        self.line_for_sku(code).is_some()
    }
}
