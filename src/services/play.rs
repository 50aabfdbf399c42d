use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_message::Message;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::{
    constants::{
        DEAD_ASSET_NAME, DEAD_ASSET_URI, GAME_ASSET_NAME, GAME_ASSET_URI, PLAY_FEE_LAMPORTS,
        WINS_ATTRIBUTE_KEY,
    },
    error::{AppError, Result},
    models::{find_active_asset, GameAsset},
    services::{
        game::{Choice, ChoiceSource, Outcome},
        mpl_core::{self, PluginAuthority, PluginAuthorityPair},
        onchain::{AssetIndexer, ChainReader},
    },
};

/// Everything a play needs besides the request itself.
pub struct PlayContext<'a> {
    pub authority: &'a Keypair,
    pub collection: Pubkey,
    pub indexer: &'a dyn AssetIndexer,
    pub chain: &'a dyn ChainReader,
    pub choices: &'a dyn ChoiceSource,
}

/// A drafted play, signed by every server-held key the message requires.
#[derive(Debug)]
pub struct PlayDraft {
    pub transaction: Transaction,
    pub asset: Pubkey,
    pub created: bool,
    pub server_choice: Choice,
    pub outcome: Outcome,
}

impl PlayDraft {
    pub fn instructions(&self) -> &[solana_message::compiled_instruction::CompiledInstruction] {
        &self.transaction.message.instructions
    }

    /// Wire form handed to the wallet.
    pub fn encode(&self) -> Result<String> {
        let bytes = bincode::serialize(&self.transaction)
            .map_err(|e| AppError::Internal(format!("Failed to serialize transaction: {}", e)))?;
        Ok(STANDARD.encode(bytes))
    }
}

fn play_fee_transfer(player: &Pubkey, authority: &Pubkey) -> Instruction {
    solana_system_interface::instruction::transfer(player, authority, PLAY_FEE_LAMPORTS)
}

fn create_game_asset(
    ctx: &PlayContext<'_>,
    asset: &Pubkey,
    player: &Pubkey,
) -> Result<Instruction> {
    mpl_core::create_v2(mpl_core::CreateAsset {
        asset: *asset,
        collection: ctx.collection,
        authority: ctx.authority.pubkey(),
        payer: *player,
        owner: *player,
        name: GAME_ASSET_NAME,
        uri: GAME_ASSET_URI,
        plugins: vec![PluginAuthorityPair {
            plugin: mpl_core::attributes_plugin(WINS_ATTRIBUTE_KEY, "0"),
            authority: Some(PluginAuthority::UpdateAuthority),
        }],
    })
}

fn record_win(ctx: &PlayContext<'_>, asset: &GameAsset, player: &Pubkey) -> Result<Instruction> {
    let wins = asset.wins()?;
    let next = wins.checked_add(1).ok_or_else(|| {
        AppError::AssetData(format!("asset {} win counter overflow", asset.address))
    })?;
    mpl_core::update_plugin_v1(mpl_core::UpdateAssetPlugin {
        asset: asset.address,
        collection: ctx.collection,
        payer: *player,
        authority: ctx.authority.pubkey(),
        plugin: mpl_core::attributes_plugin(WINS_ATTRIBUTE_KEY, next.to_string()),
    })
}

fn record_death(ctx: &PlayContext<'_>, asset: &GameAsset, player: &Pubkey) -> Result<Instruction> {
    mpl_core::update_v1(mpl_core::UpdateAsset {
        asset: asset.address,
        collection: ctx.collection,
        payer: *player,
        authority: ctx.authority.pubkey(),
        new_name: Some(DEAD_ASSET_NAME),
        new_uri: Some(DEAD_ASSET_URI),
    })
}

/// Builds the play transaction for `player`. The player's signature slot is left
/// empty for the wallet; the authority and a freshly generated asset key sign here
/// when the message requires them.
pub async fn draft_play(
    ctx: &PlayContext<'_>,
    player: Pubkey,
    choice: Option<Choice>,
) -> Result<PlayDraft> {
    let owned = ctx.indexer.assets_by_owner(&player).await?;
    let active = find_active_asset(&owned, &player, &ctx.collection).cloned();

    let mut instructions = vec![play_fee_transfer(&player, &ctx.authority.pubkey())];

    let (game_asset, asset_signer) = match active {
        Some(asset) => {
            tracing::info!("player={} reusing asset={}", player, asset.address);
            (asset, None)
        }
        None => {
            let asset_signer = Keypair::new();
            let address = asset_signer.pubkey();
            tracing::info!("player={} creating asset={}", player, address);
            instructions.push(create_game_asset(ctx, &address, &player)?);
            (
                GameAsset::fresh(address, player, ctx.collection, GAME_ASSET_NAME),
                Some(asset_signer),
            )
        }
    };

    let server_choice = ctx.choices.server_choice();
    let outcome = Outcome::resolve(choice, server_choice);
    tracing::info!(
        "player={} choice={} server_choice={} outcome={}",
        player,
        choice.map(|c| c.as_str()).unwrap_or("none"),
        server_choice,
        outcome.as_str()
    );

    match outcome {
        Outcome::Win => instructions.push(record_win(ctx, &game_asset, &player)?),
        Outcome::Loss => instructions.push(record_death(ctx, &game_asset, &player)?),
        Outcome::Draw | Outcome::Unrecognized => {}
    }

    let blockhash = ctx.chain.latest_blockhash().await?;
    let message = Message::new_with_blockhash(&instructions, Some(&player), &blockhash);
    let mut transaction = Transaction::new_unsigned(message);

    let required = transaction.message.header.num_required_signatures as usize;
    let required_keys = &transaction.message.account_keys[..required];
    let signers: Vec<&Keypair> = asset_signer
        .iter()
        .chain(std::iter::once(ctx.authority))
        .filter(|kp| required_keys.contains(&kp.pubkey()))
        .collect();
    transaction
        .try_partial_sign(&signers[..], blockhash)
        .map_err(|e| AppError::Signing(e.to_string()))?;

    Ok(PlayDraft {
        transaction,
        asset: game_asset.address,
        created: asset_signer.is_some(),
        server_choice,
        outcome,
    })
}
