use axum::{extract::State, Json};
use serde::Serialize;
use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rpc: String,
    pub authority: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let rpc_status = match state.chain.health().await {
        Ok(()) => "connected".to_string(),
        Err(err) => {
            tracing::warn!("rpc health probe failed: {}", err);
            "disconnected".to_string()
        }
    };

    let authority_status = if state.authority.is_some() {
        "loaded".to_string()
    } else {
        "missing".to_string()
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rpc: rpc_status,
        authority: authority_status,
    })
}
