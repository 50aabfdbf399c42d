use axum::{
    middleware,
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod constants;
mod crypto;
mod error;
mod models;
mod services;

use config::Config;
use constants::ACTION_PATH;
use services::{RandomChoice, SolanaRpcClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nfc_actions_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Nuke Foot Cockroach action server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "RPC: {} (devnet={})",
        config.solana_rpc_url,
        config.is_devnet()
    );
    tracing::info!("Collection: {}", config.collection_address);

    let chain = Arc::new(SolanaRpcClient::new(config.solana_rpc_url.clone()));
    let indexer = Arc::new(SolanaRpcClient::new(config.das_rpc_url.clone()));
    let app_state = api::AppState::new(
        config.clone(),
        indexer,
        chain,
        Arc::new(RandomChoice::from_entropy()),
    )?;

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: api::AppState) -> Router {
    let play = get(api::actions::describe)
        .options(api::actions::describe)
        .post(api::actions::play);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Actions rules
        .route(
            "/actions.json",
            get(api::actions::actions_json).options(api::actions::actions_json),
        )
        // Game
        .route(ACTION_PATH, play.clone())
        .route("/play", play)
        .layer(middleware::map_response_with_state(
            state.clone(),
            api::with_actions_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
