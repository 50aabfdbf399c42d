use crate::error::{AppError, Result};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use std::str::FromStr;

/// Decodes a secret key stored as a JSON byte array (the `solana-keygen` file format).
pub fn keypair_from_json(raw: &str) -> Result<Keypair> {
    let bytes: Vec<u8> = serde_json::from_str(raw.trim())
        .map_err(|e| AppError::Config(format!("AUTH_KEY is not a JSON byte array: {}", e)))?;
    if bytes.len() != 64 {
        return Err(AppError::Config(format!(
            "AUTH_KEY must contain 64 bytes, got {}",
            bytes.len()
        )));
    }
    let keypair = Keypair::try_from(bytes.as_slice())
        .map_err(|e| AppError::Config(format!("AUTH_KEY is not a valid ed25519 keypair: {}", e)))?;
    tracing::info!("Loaded authority signer {}", keypair.pubkey());
    Ok(keypair)
}

/// Parses a caller-supplied account; every failure maps to `InvalidAccount`.
pub fn parse_account(raw: &str) -> Result<Pubkey> {
    Pubkey::from_str(raw.trim()).map_err(|_| AppError::InvalidAccount)
}

/// Parses a configured or indexer-supplied address.
pub fn parse_address(raw: &str, what: &str) -> Result<Pubkey> {
    Pubkey::from_str(raw.trim())
        .map_err(|e| AppError::AssetData(format!("invalid {} address {}: {}", what, raw, e)))
}
