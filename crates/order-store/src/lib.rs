pub mod catalog;
pub mod error;
pub mod json_file;
pub mod memory;
pub mod model;
pub mod query;
pub mod store;

pub use catalog::{demo_catalog, demo_orders};
pub use common::{LineId, OrderId, SkuCode};
pub use error::{OrderStoreError, Result};
pub use json_file::JsonFileOrderStore;
pub use memory::InMemoryOrderStore;
pub use model::{NewOrder, Order, OrderLine, Sku};
pub use query::{OrderQuery, SkuQuery};
pub use store::{OrderRecords, OrderStore, OrderStoreExt};
