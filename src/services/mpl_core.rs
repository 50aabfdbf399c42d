//! Metaplex Core instruction encoding.
//!
//! Instruction data is a one-byte discriminator followed by the borsh-encoded
//! arguments. Optional accounts that are omitted are filled with the program id.

use borsh::BorshSerialize;
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::{
    constants::MPL_CORE_PROGRAM_ID,
    error::{AppError, Result},
    models::Attribute,
};

pub const MPL_CORE_ID: Pubkey = Pubkey::from_str_const(MPL_CORE_PROGRAM_ID);

const UPDATE_PLUGIN_V1: u8 = 6;
const UPDATE_V1: u8 = 15;
const CREATE_V2: u8 = 20;

const PLUGIN_ATTRIBUTES: u8 = 6;

// Wire enums trimmed to the variants this service writes. Leading variants stay
// so borsh keeps their on-chain indices.
#[derive(Debug, Clone, Copy, BorshSerialize)]
pub enum DataState {
    AccountState,
}

#[allow(dead_code)]
#[derive(Debug, Clone, BorshSerialize)]
pub enum PluginAuthority {
    None,
    Owner,
    UpdateAuthority,
}

/// The plugin variants this service writes.
#[derive(Debug, Clone, PartialEq)]
pub enum Plugin {
    Attributes { attribute_list: Vec<Attribute> },
}

impl BorshSerialize for Plugin {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            Plugin::Attributes { attribute_list } => {
                PLUGIN_ATTRIBUTES.serialize(writer)?;
                attribute_list.serialize(writer)
            }
        }
    }
}

#[derive(Debug, Clone, BorshSerialize)]
pub struct PluginAuthorityPair {
    pub plugin: Plugin,
    pub authority: Option<PluginAuthority>,
}

#[derive(BorshSerialize)]
struct CreateV2Args<'a> {
    data_state: DataState,
    name: &'a str,
    uri: &'a str,
    plugins: Option<Vec<PluginAuthorityPair>>,
    // external_plugin_adapters is always encoded as None
    external_plugin_adapters: Option<Vec<u8>>,
}

#[derive(BorshSerialize)]
struct UpdatePluginV1Args<'a> {
    plugin: &'a Plugin,
}

#[derive(BorshSerialize)]
struct UpdateV1Args<'a> {
    new_name: Option<&'a str>,
    new_uri: Option<&'a str>,
    // new_update_authority is always encoded as None
    new_update_authority: Option<u8>,
}

pub struct CreateAsset<'a> {
    pub asset: Pubkey,
    pub collection: Pubkey,
    pub authority: Pubkey,
    pub payer: Pubkey,
    pub owner: Pubkey,
    pub name: &'a str,
    pub uri: &'a str,
    pub plugins: Vec<PluginAuthorityPair>,
}

pub struct UpdateAsset<'a> {
    pub asset: Pubkey,
    pub collection: Pubkey,
    pub payer: Pubkey,
    pub authority: Pubkey,
    pub new_name: Option<&'a str>,
    pub new_uri: Option<&'a str>,
}

pub struct UpdateAssetPlugin {
    pub asset: Pubkey,
    pub collection: Pubkey,
    pub payer: Pubkey,
    pub authority: Pubkey,
    pub plugin: Plugin,
}

fn absent() -> AccountMeta {
    AccountMeta::new_readonly(MPL_CORE_ID, false)
}

fn encode<T: BorshSerialize>(discriminator: u8, args: &T) -> Result<Vec<u8>> {
    let mut data = vec![discriminator];
    args.serialize(&mut data)
        .map_err(|e| AppError::Internal(format!("Failed to encode Core instruction: {}", e)))?;
    Ok(data)
}

/// Attributes plugin holding a single key/value pair.
pub fn attributes_plugin(key: &str, value: impl Into<String>) -> Plugin {
    Plugin::Attributes {
        attribute_list: vec![Attribute {
            key: key.to_string(),
            value: value.into(),
        }],
    }
}

/// `CreateV2`: mints `asset` into `collection` for `owner`.
pub fn create_v2(args: CreateAsset<'_>) -> Result<Instruction> {
    let plugins = if args.plugins.is_empty() {
        None
    } else {
        Some(args.plugins)
    };
    let data = encode(
        CREATE_V2,
        &CreateV2Args {
            data_state: DataState::AccountState,
            name: args.name,
            uri: args.uri,
            plugins,
            external_plugin_adapters: None,
        },
    )?;

    let accounts = vec![
        AccountMeta::new(args.asset, true),
        AccountMeta::new(args.collection, false),
        AccountMeta::new_readonly(args.authority, true),
        AccountMeta::new(args.payer, true),
        AccountMeta::new_readonly(args.owner, false),
        absent(),
        AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        absent(),
    ];
    Ok(Instruction::new_with_bytes(MPL_CORE_ID, &data, accounts))
}

/// `UpdatePluginV1`: replaces an existing plugin on `asset`.
pub fn update_plugin_v1(args: UpdateAssetPlugin) -> Result<Instruction> {
    let data = encode(UPDATE_PLUGIN_V1, &UpdatePluginV1Args { plugin: &args.plugin })?;

    let accounts = vec![
        AccountMeta::new(args.asset, false),
        AccountMeta::new(args.collection, false),
        AccountMeta::new(args.payer, true),
        AccountMeta::new_readonly(args.authority, true),
        AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        absent(),
    ];
    Ok(Instruction::new_with_bytes(MPL_CORE_ID, &data, accounts))
}

/// `UpdateV1`: rewrites the asset's name and/or uri.
pub fn update_v1(args: UpdateAsset<'_>) -> Result<Instruction> {
    let data = encode(
        UPDATE_V1,
        &UpdateV1Args {
            new_name: args.new_name,
            new_uri: args.new_uri,
            new_update_authority: None,
        },
    )?;

    let accounts = vec![
        AccountMeta::new(args.asset, false),
        AccountMeta::new_readonly(args.collection, false),
        AccountMeta::new(args.payer, true),
        AccountMeta::new_readonly(args.authority, true),
        AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        absent(),
    ];
    Ok(Instruction::new_with_bytes(MPL_CORE_ID, &data, accounts))
}
