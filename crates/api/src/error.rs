//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::ServiceError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Request rejected before reaching the service.
    BadRequest(String),
    /// Error raised by the order service.
    Service(ServiceError),
}

impl ApiError {
    /// Label for the `kind` dimension of `api_errors_total`.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "invalid_request",
            ApiError::Service(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Some(msg)),
            ApiError::Service(err) => service_error_to_response(err),
        };

        metrics::counter!(
            "api_errors_total",
            "status" => status.as_u16().to_string(),
            "kind" => kind
        )
        .increment(1);

        match message {
            Some(message) => {
                let body = serde_json::json!({ "error": message });
                (status, axum::Json(body)).into_response()
            }
            None => status.into_response(),
        }
    }
}

/// Internal failures carry no body; the details were logged where they happened.
fn service_error_to_response(err: ServiceError) -> (StatusCode, Option<String>) {
    match err {
        ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Some(msg)),
        ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, Some(msg)),
        ServiceError::Internal(msg) => {
            tracing::debug!(error = %msg, "responding with internal server error");
            (StatusCode::INTERNAL_SERVER_ERROR, None)
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}
