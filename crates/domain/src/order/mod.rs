//! Order service and its inputs.

mod commands;
mod service;

pub use commands::{CreateOrder, OrderLineInput};
pub use service::OrderService;
