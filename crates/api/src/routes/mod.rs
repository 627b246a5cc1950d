//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod orders;
pub mod skus;

use std::sync::Arc;

use domain::OrderService;
use order_store::OrderStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub order_service: OrderService<S>,
}

pub type SharedState<S> = Arc<AppState<S>>;
