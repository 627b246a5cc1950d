//! Domain layer for the checkout order system.
//!
//! This crate provides the order service, which sits between the HTTP
//! transport and the order store and enforces the rules on an order's
//! lines:
//! - SKU codes are unique within an order
//! - quantities are positive
//! - duplicate records in the store surface as internal errors

pub mod error;
pub mod order;

pub use error::{ServiceError, ServiceResult};
pub use order::{CreateOrder, OrderLineInput, OrderService};
