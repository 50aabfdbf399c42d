use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;

use crate::{
    constants::{DEAD_ASSET_NAME, WINS_ATTRIBUTE_KEY},
    crypto::parse_address,
    error::{AppError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// A player's game asset as seen by the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct GameAsset {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub collection: Option<Pubkey>,
    pub attributes: Vec<Attribute>,
}

impl GameAsset {
    /// In-memory view of an asset minted in the current transaction.
    pub fn fresh(address: Pubkey, owner: Pubkey, collection: Pubkey, name: &str) -> Self {
        Self {
            address,
            owner,
            name: name.to_string(),
            collection: Some(collection),
            attributes: vec![Attribute {
                key: WINS_ATTRIBUTE_KEY.to_string(),
                value: "0".to_string(),
            }],
        }
    }

    pub fn is_dead(&self) -> bool {
        self.name == DEAD_ASSET_NAME
    }

    pub fn belongs_to(&self, collection: &Pubkey) -> bool {
        self.collection.as_ref() == Some(collection)
    }

    /// Current win count; an asset without the attribute has not won yet.
    pub fn wins(&self) -> Result<u64> {
        let Some(attribute) = self.attributes.iter().find(|a| a.key == WINS_ATTRIBUTE_KEY) else {
            return Ok(0);
        };
        attribute.value.trim().parse::<u64>().map_err(|e| {
            AppError::AssetData(format!(
                "asset {} has non-numeric {} value {:?}: {}",
                self.address, WINS_ATTRIBUTE_KEY, attribute.value, e
            ))
        })
    }
}

/// First live asset owned by `owner` under the game collection.
pub fn find_active_asset<'a>(
    assets: &'a [GameAsset],
    owner: &Pubkey,
    collection: &Pubkey,
) -> Option<&'a GameAsset> {
    assets
        .iter()
        .find(|asset| asset.owner == *owner && asset.belongs_to(collection) && !asset.is_dead())
}

// DAS `getAssetsByOwner` payloads

#[derive(Debug, Clone, Deserialize)]
pub struct DasAssetList {
    #[serde(default)]
    pub items: Vec<DasAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DasAsset {
    pub id: String,
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub content: DasContent,
    #[serde(default)]
    pub grouping: Vec<DasGrouping>,
    pub ownership: DasOwnership,
    #[serde(default)]
    pub plugins: DasPlugins,
    #[serde(default)]
    pub burnt: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DasContent {
    #[serde(default)]
    pub metadata: DasMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DasMetadata {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DasGrouping {
    pub group_key: String,
    pub group_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DasOwnership {
    pub owner: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DasPlugins {
    #[serde(default)]
    pub attributes: Option<DasAttributesPlugin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DasAttributesPlugin {
    pub data: DasAttributesData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DasAttributesData {
    #[serde(default)]
    pub attribute_list: Vec<Attribute>,
}

impl DasAsset {
    fn collection(&self) -> Option<&str> {
        self.grouping
            .iter()
            .find(|group| group.group_key == "collection")
            .map(|group| group.group_value.as_str())
    }
}

impl TryFrom<DasAsset> for GameAsset {
    type Error = AppError;

    fn try_from(asset: DasAsset) -> Result<Self> {
        let collection = asset
            .collection()
            .map(|value| parse_address(value, "collection"))
            .transpose()?;
        Ok(GameAsset {
            address: parse_address(&asset.id, "asset")?,
            owner: parse_address(&asset.ownership.owner, "owner")?,
            name: asset.content.metadata.name,
            collection,
            attributes: asset
                .plugins
                .attributes
                .map(|plugin| plugin.data.attribute_list)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, collection: Option<Pubkey>, wins: Option<&str>) -> GameAsset {
        owned_asset(Pubkey::new_unique(), name, collection, wins)
    }

    fn owned_asset(owner: Pubkey, name: &str, collection: Option<Pubkey>, wins: Option<&str>) -> GameAsset {
        GameAsset {
            address: Pubkey::new_unique(),
            owner,
            name: name.to_string(),
            collection,
            attributes: wins
                .map(|value| {
                    vec![Attribute {
                        key: WINS_ATTRIBUTE_KEY.to_string(),
                        value: value.to_string(),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn find_active_asset_skips_dead_and_foreign_assets() {
        let owner = Pubkey::new_unique();
        let collection = Pubkey::new_unique();
        let assets = vec![
            owned_asset(owner, "Other", Some(Pubkey::new_unique()), Some("9")),
            owned_asset(owner, DEAD_ASSET_NAME, Some(collection), Some("2")),
            owned_asset(owner, "Nuke Foot Cockroach", None, Some("1")),
            asset("Nuke Foot Cockroach", Some(collection), Some("8")),
            owned_asset(owner, "Nuke Foot Cockroach", Some(collection), Some("5")),
        ];

        let active = find_active_asset(&assets, &owner, &collection).expect("live asset");
        assert_eq!(active.address, assets[4].address);
    }

    #[test]
    fn find_active_asset_returns_none_when_only_dead() {
        let owner = Pubkey::new_unique();
        let collection = Pubkey::new_unique();
        let assets = vec![owned_asset(owner, DEAD_ASSET_NAME, Some(collection), Some("4"))];
        assert!(find_active_asset(&assets, &owner, &collection).is_none());
    }

    #[test]
    fn wins_defaults_to_zero_without_attribute() {
        assert_eq!(asset("x", None, None).wins().expect("wins"), 0);
    }

    #[test]
    fn wins_rejects_non_numeric_value() {
        let result = asset("x", None, Some("many")).wins();
        assert!(matches!(result, Err(AppError::AssetData(_))));
    }

    #[test]
    fn fresh_asset_starts_with_zero_wins() {
        let fresh = GameAsset::fresh(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            "Nuke Foot Cockroach",
        );
        assert_eq!(fresh.wins().expect("wins"), 0);
        assert!(!fresh.is_dead());
    }

    #[test]
    fn das_asset_converts_collection_and_attributes() {
        let id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let collection = Pubkey::new_unique();
        let raw = serde_json::json!({
            "interface": "MplCoreAsset",
            "id": id.to_string(),
            "content": { "metadata": { "name": "Nuke Foot Cockroach" } },
            "grouping": [{ "group_key": "collection", "group_value": collection.to_string() }],
            "ownership": { "owner": owner.to_string(), "frozen": false },
            "plugins": {
                "attributes": {
                    "index": 0,
                    "offset": 119,
                    "authority": { "type": "UpdateAuthority" },
                    "data": { "attribute_list": [{ "key": "Wins", "value": "3" }] }
                }
            },
            "burnt": false
        });

        let das: DasAsset = serde_json::from_value(raw).expect("das asset");
        let game = GameAsset::try_from(das).expect("game asset");
        assert_eq!(game.address, id);
        assert_eq!(game.owner, owner);
        assert!(game.belongs_to(&collection));
        assert_eq!(game.wins().expect("wins"), 3);
    }

    #[test]
    fn das_asset_without_plugins_has_no_attributes() {
        let raw = serde_json::json!({
            "id": Pubkey::new_unique().to_string(),
            "ownership": { "owner": Pubkey::new_unique().to_string() }
        });
        let das: DasAsset = serde_json::from_value(raw).expect("das asset");
        let game = GameAsset::try_from(das).expect("game asset");
        assert!(game.attributes.is_empty());
        assert!(game.collection.is_none());
    }
}
