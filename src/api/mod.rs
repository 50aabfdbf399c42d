// src/api/mod.rs

pub mod actions;
pub mod health;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use std::sync::Arc;

use crate::{
    config::Config,
    constants::ACTION_VERSION,
    crypto::keypair_from_json,
    error::{AppError, Result},
    services::{
        game::ChoiceSource,
        onchain::{AssetIndexer, ChainReader},
    },
};

// AppState definition
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub collection: Pubkey,
    pub authority: Option<Arc<Keypair>>,
    pub indexer: Arc<dyn AssetIndexer>,
    pub chain: Arc<dyn ChainReader>,
    pub choices: Arc<dyn ChoiceSource>,
}

impl AppState {
    pub fn new(
        config: Config,
        indexer: Arc<dyn AssetIndexer>,
        chain: Arc<dyn ChainReader>,
        choices: Arc<dyn ChoiceSource>,
    ) -> Result<Self> {
        let collection = crate::crypto::parse_address(&config.collection_address, "collection")
            .map_err(|e| AppError::Config(e.to_string()))?;
        let authority = config
            .auth_key
            .as_deref()
            .map(keypair_from_json)
            .transpose()?
            .map(Arc::new);

        Ok(Self {
            config,
            collection,
            authority,
            indexer,
            chain,
            choices,
        })
    }

    pub fn require_authority(&self) -> Result<&Keypair> {
        self.authority
            .as_deref()
            .ok_or_else(|| AppError::Config("AUTH_KEY is not configured".to_string()))
    }
}

/// Headers every Solana Actions response must carry, preflight included.
pub fn actions_cors_headers(blockchain_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,PUT,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(
            "Content-Type, Authorization, Content-Encoding, Accept-Encoding, X-Accept-Action-Version, X-Accept-Blockchain-Ids",
        ),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("X-Action-Version, X-Blockchain-Ids"),
    );
    headers.insert(
        HeaderName::from_static("x-action-version"),
        HeaderValue::from_static(ACTION_VERSION),
    );
    match HeaderValue::from_str(blockchain_id) {
        Ok(value) => {
            headers.insert(HeaderName::from_static("x-blockchain-ids"), value);
        }
        Err(_) => tracing::warn!("Blockchain id {:?} is not a valid header value", blockchain_id),
    }
    headers
}

pub async fn with_actions_headers(State(state): State<AppState>, mut response: Response) -> Response {
    response
        .headers_mut()
        .extend(actions_cors_headers(&state.config.blockchain_id));
    response
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::services::{
        game::{Choice, FixedChoice},
        play::testing::{StaticChain, StaticIndexer},
    };
    use crate::models::GameAsset;
    use solana_signer::Signer;

    pub fn test_state(assets: Vec<GameAsset>, server: Choice) -> (AppState, Arc<StaticIndexer>) {
        let authority = Keypair::new();
        let mut config = crate::config::test_config();
        config.auth_key = Some(
            serde_json::to_string(&authority.to_bytes().to_vec()).expect("secret json"),
        );
        let indexer = Arc::new(StaticIndexer::new(assets));
        let state = AppState::new(
            config,
            indexer.clone(),
            Arc::new(StaticChain(solana_hash::Hash::new_unique())),
            Arc::new(FixedChoice(server)),
        )
        .expect("state");
        assert_eq!(
            state.require_authority().expect("authority").pubkey(),
            authority.pubkey()
        );
        (state, indexer)
    }
}
