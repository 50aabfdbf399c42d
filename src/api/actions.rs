use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};

use super::AppState;
use crate::{
    constants::{
        ACTION_DESCRIPTION, ACTION_ICON_PATH, ACTION_LABEL, ACTION_PATH, ACTION_POST_MESSAGE,
        ACTION_TITLE,
    },
    crypto::parse_account,
    error::{AppError, Result},
    models::{
        ActionGetResponse, ActionLinks, ActionPostRequest, ActionPostResponse, ActionRule,
        ActionsJson, LinkedAction, PlayQuery,
    },
    services::{
        game::Choice,
        play::{draft_play, PlayContext},
    },
};

// Origin of the incoming request, used to build absolute icon URLs.
fn request_origin(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.config.public_base_url {
        return base.clone();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");
    format!("{}://{}", scheme, host)
}

fn describe_action(origin: &str) -> ActionGetResponse {
    ActionGetResponse {
        title: ACTION_TITLE.to_string(),
        icon: format!("{}{}", origin, ACTION_ICON_PATH),
        description: ACTION_DESCRIPTION.to_string(),
        label: ACTION_LABEL.to_string(),
        links: ActionLinks {
            actions: Choice::ALL
                .iter()
                .map(|choice| LinkedAction {
                    label: choice.label().to_string(),
                    href: format!("{}?choice={}", ACTION_PATH, choice),
                })
                .collect(),
        },
    }
}

fn parse_player(body: &[u8]) -> Result<solana_pubkey::Pubkey> {
    let request: ActionPostRequest =
        serde_json::from_slice(body).map_err(|_| AppError::InvalidAccount)?;
    parse_account(&request.account)
}

/// GET|OPTIONS /api/actions/play
pub async fn describe(State(state): State<AppState>, headers: HeaderMap) -> Json<ActionGetResponse> {
    Json(describe_action(&request_origin(&state, &headers)))
}

/// POST /api/actions/play?choice=...
pub async fn play(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Json<ActionPostResponse>> {
    let player = parse_player(&body)?;
    let query = PlayQuery::from_pairs(params);

    let choice = query.choice.as_deref().and_then(|raw| match raw.parse::<Choice>() {
        Ok(choice) => Some(choice),
        Err(err) => {
            tracing::debug!("player={} sent unrecognized move: {}", player, err);
            None
        }
    });

    let authority = state.require_authority()?;
    let ctx = PlayContext {
        authority,
        collection: state.collection,
        indexer: state.indexer.as_ref(),
        chain: state.chain.as_ref(),
        choices: state.choices.as_ref(),
    };

    let draft = draft_play(&ctx, player, choice).await?;
    tracing::info!(
        "drafted play player={} asset={} created={} server_choice={} outcome={} instructions={}",
        player,
        draft.asset,
        draft.created,
        draft.server_choice,
        draft.outcome.as_str(),
        draft.instructions().len()
    );

    Ok(Json(ActionPostResponse {
        transaction: draft.encode()?,
        message: Some(ACTION_POST_MESSAGE.to_string()),
    }))
}

/// GET /actions.json
pub async fn actions_json() -> Json<ActionsJson> {
    Json(ActionsJson {
        rules: vec![
            ActionRule {
                path_pattern: "/api/actions/**".to_string(),
                api_path: "/api/actions/**".to_string(),
            },
            ActionRule {
                path_pattern: "/play".to_string(),
                api_path: ACTION_PATH.to_string(),
            },
        ],
    })
}
