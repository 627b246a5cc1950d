//! Order endpoints.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use common::{LineId, OrderId};
use order_store::OrderStore;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::SharedState;
use crate::dto::{OrderDto, OrderLineDto};
use crate::error::ApiError;
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub order_line_id: Option<u32>,
}

/// GET /api/orders — list every order.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let orders = state.order_service.get_orders().await?;
    Ok(Json(orders.iter().map(OrderDto::from).collect()))
}

/// GET /api/orders/{orderId} — load one order.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> Result<Json<OrderDto>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.order_service.get_order(order_id).await?;
    Ok(Json(OrderDto::from(&order)))
}

/// POST /api/orders — create an order from an optional body.
///
/// An empty body or `null` creates an order without lines.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: OrderStore + 'static>(
    State(state): State<SharedState<S>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let order: Option<OrderDto> = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        parse_body(&body)?
    };

    if let Some(order) = order.as_ref() {
        validation::validate_order(order)?;
    }

    let order_id = state
        .order_service
        .create_order(order.map(OrderDto::into_command))
        .await?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/orders/{order_id}"))],
        Json(order_id.get()),
    ))
}

/// PUT /api/orders/{orderId} — add a line, or change the quantity of an existing one.
#[tracing::instrument(skip(state, body))]
pub async fn update_line<S: OrderStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let order_id = parse_order_id(&id)?;
    let line: OrderLineDto = parse_body(&body)?;
    validation::validate_order_line(&line)?;

    let line_id = state
        .order_service
        .update_order_line(order_id, line.into_input())
        .await?;

    Ok((StatusCode::CREATED, Json(line_id.get())))
}

/// DELETE /api/orders/{orderId}[?orderLineId=N] — remove one line, or clear the order.
#[tracing::instrument(skip(state))]
pub async fn delete<S: OrderStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&id)?;

    match params.order_line_id {
        Some(line_id) => {
            state
                .order_service
                .delete_order_line(order_id, LineId::new(line_id))
                .await?
        }
        None => state.order_service.clear_order(order_id).await?,
    }

    Ok(StatusCode::OK)
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let raw: u32 = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(OrderId::new(raw))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
}
