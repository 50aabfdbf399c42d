use serde::{Deserialize, Serialize};

/// Descriptor returned by `GET` on an action endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionGetResponse {
    pub title: String,
    pub icon: String,
    pub description: String,
    pub label: String,
    pub links: ActionLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedAction {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionPostRequest {
    pub account: String,
}

#[derive(Debug, Serialize)]
pub struct ActionPostResponse {
    pub transaction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `actions.json` served at the site root so clients can unfurl links into actions.
#[derive(Debug, Serialize)]
pub struct ActionsJson {
    pub rules: Vec<ActionRule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

/// Query string of a play request. A repeated `choice` keeps its first value.
#[derive(Debug, Default)]
pub struct PlayQuery {
    pub choice: Option<String>,
}

impl PlayQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let choice = pairs
            .into_iter()
            .find(|(key, _)| key == "choice")
            .map(|(_, value)| value);
        Self { choice }
    }
}
