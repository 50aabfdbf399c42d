use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use std::str::FromStr;

use crate::{
    constants::{DAS_MAX_PAGES, DAS_PAGE_LIMIT},
    error::{AppError, Result},
    models::{asset::DasAsset, DasAssetList, GameAsset},
};

/// Owner-to-assets lookup on a DAS-compatible indexer.
#[async_trait]
pub trait AssetIndexer: Send + Sync {
    async fn assets_by_owner(&self, owner: &Pubkey) -> Result<Vec<GameAsset>>;
}

/// Chain reads needed to draft a transaction.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;
    async fn health(&self) -> Result<()>;
}

fn rpc_request(method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    })
}

fn assets_by_owner_params(owner: &Pubkey, page: u32) -> serde_json::Value {
    serde_json::json!({
        "ownerAddress": owner.to_string(),
        "page": page,
        "limit": DAS_PAGE_LIMIT
    })
}

// Burnt items and items with unparsable addresses are skipped; only collection
// members matter to the caller.
fn collect_page(items: Vec<DasAsset>, assets: &mut Vec<GameAsset>) {
    for item in items {
        if item.burnt {
            continue;
        }
        tracing::trace!("indexed asset {} interface={}", item.id, item.interface);
        let id = item.id.clone();
        match GameAsset::try_from(item) {
            Ok(asset) => assets.push(asset),
            Err(err) => tracing::debug!("skipping indexed asset {}: {}", id, err),
        }
    }
}

fn has_more_pages(owner: &Pubkey, page: u32, fetched: usize) -> bool {
    if fetched < DAS_PAGE_LIMIT as usize {
        return false;
    }
    if page >= DAS_MAX_PAGES {
        tracing::warn!(
            "owner={} asset lookup stopped at page cap {}, later assets not searched",
            owner,
            DAS_MAX_PAGES
        );
        return false;
    }
    true
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcContextual<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
}

impl<T> RpcResponse<T> {
    fn into_result(self, method: &str) -> std::result::Result<T, String> {
        if let Some(err) = self.error {
            return Err(format!("{} failed ({}): {}", method, err.code, err.message));
        }
        self.result
            .ok_or_else(|| format!("{} returned no result", method))
    }
}

/// Solana JSON-RPC client (also speaks the DAS extension methods)
pub struct SolanaRpcClient {
    rpc_url: String,
    client: reqwest::Client,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: String) -> Self {
        Self {
            rpc_url,
            client: reqwest::Client::new(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> std::result::Result<T, String> {
        let request = rpc_request(method, params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("{} returned HTTP {}", method, status));
        }

        let result: RpcResponse<T> = response.json().await.map_err(|e| e.to_string())?;
        result.into_result(method)
    }
}

#[async_trait]
impl AssetIndexer for SolanaRpcClient {
    async fn assets_by_owner(&self, owner: &Pubkey) -> Result<Vec<GameAsset>> {
        let mut assets = Vec::new();

        for page in 1..=DAS_MAX_PAGES {
            let list: DasAssetList = self
                .call("getAssetsByOwner", assets_by_owner_params(owner, page))
                .await
                .map_err(AppError::AssetIndexer)?;
            let fetched = list.items.len();
            collect_page(list.items, &mut assets);

            if !has_more_pages(owner, page, fetched) {
                break;
            }
        }

        tracing::debug!("owner={} indexed_assets={}", owner, assets.len());
        Ok(assets)
    }
}

#[async_trait]
impl ChainReader for SolanaRpcClient {
    async fn latest_blockhash(&self) -> Result<Hash> {
        let response: RpcContextual<LatestBlockhash> = self
            .call(
                "getLatestBlockhash",
                serde_json::json!([{ "commitment": "confirmed" }]),
            )
            .await
            .map_err(AppError::BlockchainRPC)?;

        Hash::from_str(&response.value.blockhash).map_err(|e| {
            AppError::BlockchainRPC(format!(
                "invalid blockhash {}: {}",
                response.value.blockhash, e
            ))
        })
    }

    async fn health(&self) -> Result<()> {
        let status: String = self
            .call("getHealth", serde_json::json!([]))
            .await
            .map_err(AppError::BlockchainRPC)?;
        if status == "ok" {
            Ok(())
        } else {
            Err(AppError::BlockchainRPC(format!("node reports {}", status)))
        }
    }
}
