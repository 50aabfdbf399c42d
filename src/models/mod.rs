// src/models/mod.rs
pub mod action;
pub mod asset;

pub use action::{
    ActionGetResponse,
    ActionLinks,
    ActionPostRequest,
    ActionPostResponse,
    ActionRule,
    ActionsJson,
    LinkedAction,
    PlayQuery,
};
pub use asset::{find_active_asset, Attribute, DasAssetList, GameAsset};
