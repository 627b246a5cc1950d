//! API server entry point.

use api::config::{Config, StoreBackend};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, JsonFileOrderStore, OrderStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Builds the app around `store` and serves it until shutdown.
async fn serve<S: OrderStore + 'static>(config: &Config, store: S, metrics_handle: PrometheusHandle) {
    let state = api::create_default_state(store);
    let app = api::create_app(state, metrics_handle, api::cors_layer(&config.cors_origin));

    let addr = config.addr();
    tracing::info!(%addr, store = ?config.store, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("invalid configuration");

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Pick the order store and serve
    match config.store {
        StoreBackend::File => {
            tracing::info!(path = %config.data_path.display(), "using JSON file order store");
            let store = JsonFileOrderStore::new(config.data_path.clone());
            serve(&config, store, metrics_handle).await;
        }
        StoreBackend::Memory => {
            tracing::info!("using in-memory order store with demo data");
            serve(&config, InMemoryOrderStore::with_demo_data(), metrics_handle).await;
        }
    }

    tracing::info!("server shut down gracefully");
}
