use serde::Deserialize;
use std::env;

use crate::constants::{DEVNET_BLOCKCHAIN_ID, DEVNET_RPC_URL, GAME_COLLECTION_ADDRESS};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Blockchain
    pub solana_rpc_url: String,
    pub das_rpc_url: String,
    pub blockchain_id: String,

    // Authority signer, JSON array of secret key bytes
    pub auth_key: Option<String>,

    // Game
    pub collection_address: String,

    // Origin used for icon URLs when running behind a proxy
    pub public_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let solana_rpc_url = non_empty_var("SOLANA_RPC").unwrap_or_else(|| DEVNET_RPC_URL.to_string());
        let das_rpc_url = non_empty_var("DAS_RPC_URL").unwrap_or_else(|| solana_rpc_url.clone());

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            solana_rpc_url,
            das_rpc_url,
            blockchain_id: non_empty_var("ACTION_BLOCKCHAIN_ID")
                .unwrap_or_else(|| DEVNET_BLOCKCHAIN_ID.to_string()),

            auth_key: non_empty_var("AUTH_KEY"),

            collection_address: non_empty_var("COLLECTION_ADDRESS")
                .unwrap_or_else(|| GAME_COLLECTION_ADDRESS.to_string()),

            public_base_url: non_empty_var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.solana_rpc_url)
            .map_err(|e| anyhow::anyhow!("SOLANA_RPC is not a valid URL: {}", e))?;
        url::Url::parse(&self.das_rpc_url)
            .map_err(|e| anyhow::anyhow!("DAS_RPC_URL is not a valid URL: {}", e))?;
        if let Some(base) = &self.public_base_url {
            url::Url::parse(base)
                .map_err(|e| anyhow::anyhow!("PUBLIC_BASE_URL is not a valid URL: {}", e))?;
        }
        if self.collection_address.trim().is_empty() {
            anyhow::bail!("COLLECTION_ADDRESS is empty");
        }

        if self.solana_rpc_url == crate::constants::DEVNET_RPC_URL {
            tracing::warn!("SOLANA_RPC not set; using public devnet endpoint");
        }
        if self.auth_key.is_none() {
            tracing::warn!("AUTH_KEY is not set; play requests will fail until it is configured");
        }

        Ok(())
    }

    pub fn is_devnet(&self) -> bool {
        self.environment == "development" || self.blockchain_id == DEVNET_BLOCKCHAIN_ID
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        environment: "development".to_string(),
        solana_rpc_url: "http://localhost:8899".to_string(),
        das_rpc_url: "http://localhost:8899".to_string(),
        blockchain_id: DEVNET_BLOCKCHAIN_ID.to_string(),
        auth_key: None,
        collection_address: GAME_COLLECTION_ADDRESS.to_string(),
        public_base_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_local_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_rpc_url() {
        let mut config = test_config();
        config.solana_rpc_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_collection() {
        let mut config = test_config();
        config.collection_address = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn mainnet_blockchain_id_is_not_devnet() {
        let mut config = test_config();
        config.environment = "production".to_string();
        config.blockchain_id = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp".to_string();
        assert!(!config.is_devnet());
    }
}
