//! Wire representations and their mapping to and from store models.
//!
//! Field names are camelCase to match the existing web client.

use common::{LineId, SkuCode};
use domain::{CreateOrder, OrderLineInput};
use order_store::{Order, OrderLine, Sku};
use serde::{Deserialize, Serialize};

/// An order as exchanged with API clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub lines: Option<Vec<OrderLineDto>>,
}

/// An order line as exchanged with API clients.
///
/// An `id` or `sortOrder` of `0` means "not assigned yet".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub sku_code: Option<String>,
    #[serde(default)]
    pub sku_display_name: Option<String>,
}

/// A catalog entry as exchanged with API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDto {
    pub code: String,
    pub display_name: String,
}

// -- Outbound --

impl From<&Sku> for SkuDto {
    fn from(sku: &Sku) -> Self {
        Self {
            code: sku.code.to_string(),
            display_name: sku.display_name.clone(),
        }
    }
}

impl From<&OrderLine> for OrderLineDto {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.id.map(|id| id.get()).unwrap_or_default(),
            sort_order: line.sort_order.unwrap_or_default(),
            quantity: i64::from(line.quantity),
            sku_code: Some(line.sku.code.to_string()),
            sku_display_name: Some(line.sku.display_name.clone()),
        }
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.get(),
            lines: Some(order.lines.iter().map(OrderLineDto::from).collect()),
        }
    }
}

// -- Inbound --

impl OrderLineDto {
    /// Maps a validated line to service input.
    ///
    /// The display name is ignored; the catalog is authoritative.
    pub fn into_input(self) -> OrderLineInput {
        OrderLineInput {
            id: (self.id != 0).then(|| LineId::new(self.id)),
            sku_code: SkuCode::new(self.sku_code.unwrap_or_default().trim()),
            quantity: u32::try_from(self.quantity).unwrap_or_default(),
            sort_order: (self.sort_order != 0).then_some(self.sort_order),
        }
    }
}

impl OrderDto {
    /// Maps a validated order to a create command. The order ID is ignored.
    pub fn into_command(self) -> CreateOrder {
        CreateOrder::with_lines(
            self.lines
                .unwrap_or_default()
                .into_iter()
                .map(OrderLineDto::into_input)
                .collect(),
        )
    }
}
