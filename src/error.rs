use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned when the caller's `account` is not a valid public key.
pub const INVALID_ACCOUNT_MESSAGE: &str = "Invalid \"account\" provided";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid \"account\" provided")]
    InvalidAccount,

    #[error("Blockchain RPC error: {0}")]
    BlockchainRPC(String),

    #[error("Asset indexer error: {0}")]
    AssetIndexer(String),

    #[error("Invalid asset data: {0}")]
    AssetData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Malformed input from the caller, as opposed to a failing collaborator.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AppError::InvalidAccount)
    }
}

// Action clients render the body verbatim, so every failure is a plain-text 400.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_invalid_input() {
            tracing::debug!("rejecting play request: {}", self);
        } else {
            tracing::warn!("play request failed upstream: {}", self);
        }

        let message = match self {
            AppError::InvalidAccount => INVALID_ACCOUNT_MESSAGE.to_string(),
            other => other.to_string(),
        };

        (StatusCode::BAD_REQUEST, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
