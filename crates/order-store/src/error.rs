use thiserror::Error;

use crate::OrderId;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An update targeted an order that was never created.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The next order ID, line ID, or sort order would overflow.
    #[error("No {0} left to assign")]
    IdentityExhausted(&'static str),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, OrderStoreError>;
