mod config;
mod handler;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use edge_image_core::{ImageEngine, Pipeline, StorageProxyClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline<ImageEngine>>,
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/origin-response", post(handler::origin_response))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env()?;
    let storage_client = StorageProxyClient::from_env()?;

    let pipeline = Pipeline::new(
        Arc::new(storage_client),
        Arc::new(ImageEngine::new()),
        config.bucket.clone(),
    );
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, bucket = %config.bucket, "edge image processor listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
