//! Service error taxonomy.

use thiserror::Error;

/// Errors returned by the order service.
///
/// Only three kinds exist. `Internal` carries a public-safe message; the
/// underlying fault is logged where it is raised and never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The caller supplied input that it can correct.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An unexpected fault or a store-integrity violation.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns a short label for the error kind, used as the `kind` label
    /// on `api_errors_total`.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Internal(_) => "internal",
        }
    }

    /// Returns the message carried by the error.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Internal(msg) => msg,
        }
    }
}

/// Result type for order service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = ServiceError::NotFound("Order not found".to_string());
        assert_eq!(err.to_string(), "Order not found");
        assert_eq!(err.message(), "Order not found");
        assert_eq!(err.kind(), "not_found");
    }
}
