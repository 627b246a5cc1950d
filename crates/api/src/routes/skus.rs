//! Product catalog endpoint.

use axum::Json;
use axum::extract::State;
use order_store::OrderStore;

use super::SharedState;
use crate::dto::SkuDto;
use crate::error::ApiError;

/// GET /api/skus — list the catalog.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Json<Vec<SkuDto>>, ApiError> {
    let skus = state.order_service.get_skus().await?;
    Ok(Json(skus.iter().map(SkuDto::from).collect()))
}
