//! HTTP API server for the checkout order system.
//!
//! Exposes the catalog and order endpoints under `/api`, plus `/health`
//! and Prometheus `/metrics`, with structured logging via tracing.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use domain::OrderService;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    cors: CorsLayer,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/skus", get(routes::skus::list::<S>))
        .route(
            "/api/orders",
            get(routes::orders::list::<S>).post(routes::orders::create::<S>),
        )
        .route(
            "/api/orders/{order_id}",
            get(routes::orders::get::<S>)
                .put(routes::orders::update_line::<S>)
                .delete(routes::orders::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around an order store.
pub fn create_default_state<S: OrderStore + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        order_service: OrderService::new(store),
    })
}

/// Builds the CORS layer for the configured client origin.
///
/// `*` or an origin that is not a valid header value allows any origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origin.parse::<HeaderValue>() {
        Ok(value) if origin != "*" => layer.allow_origin(value),
        _ => {
            tracing::warn!(%origin, "allowing any CORS origin");
            layer.allow_origin(Any)
        }
    }
}
