pub mod types;

pub use types::{LineId, OrderId, SkuCode};
