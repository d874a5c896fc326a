//! Swap record → form state.
//!
//! Every swap contract stores its entries as a tuple. The fields shared by
//! all of them (`when`, `done`/`open`, the counter-asset amount) are read the
//! same way; the asset leg depends on the swap type:
//!
//! | type      | asset fields                          | recipient      | sender       |
//! |-----------|---------------------------------------|----------------|--------------|
//! | `ft`      | `ft`, `amount`                        | `ft-receiver`  | `ft-sender`  |
//! | `stx`     | `ustx`                                | `stx-receiver` | `stx-sender` |
//! | `nft`     | `nft`, `nft-id`                       | `nft-receiver` | `nft-sender` |
//! | `stx-ft`  | `ft`, `amount`, `fees`                | `stx-sender`   | `ft-sender`  |
//! | `stx-nft` | `nft`, `nft-id`, `fees`               | `stx-sender`   | `nft-sender` |
//!
//! Non-atomic swaps additionally carry `btc-receiver`, the output script
//! the buyer has to pay.

use adapters::stacks::{FtData, TokenMetadata};
use corelib::{
    AssetDescriptor, BtcNetwork, ContractId, DEFAULT_FEE_ID, FeeRegistry, FormState, SwapRecord,
    SwapType, fees::fee_registry_for, pubscript_to_btc_address,
};
use tracing::{debug, instrument, warn};

use crate::error::DecodeError;

/// Native STX precision.
pub const STX_DECIMALS: u32 = 6;

pub fn is_supported(swap_type: &SwapType) -> bool {
    !matches!(swap_type, SwapType::Other(_))
}

fn scale(raw: u128, factor: u64) -> f64 {
    raw as f64 / factor as f64
}

fn scale_decimals(raw: u128, decimals: u32) -> Result<f64, DecodeError> {
    let exp = i32::try_from(decimals).map_err(|_| DecodeError::Decimals(decimals))?;
    Ok(raw as f64 / 10f64.powi(exp))
}

/// `done` when present; older contracts only have `open`.
fn done_flag(record: &SwapRecord) -> Result<u64, DecodeError> {
    if record.contains("done") {
        return Ok(record.uint_u64("done")?);
    }
    Ok(if record.bool("open")? { 0 } else { 1 })
}

/// Counter-asset price in human units, as classified for this type.
pub fn counter_amount(record: &SwapRecord, swap_type: &SwapType) -> Result<f64, DecodeError> {
    let raw = record.uint(swap_type.amount_field_name())?;
    Ok(scale(raw, swap_type.scaling_factor()))
}

async fn resolve_ft<M>(
    record: &SwapRecord,
    metadata: &M,
) -> Result<(AssetDescriptor, FtData), DecodeError>
where
    M: TokenMetadata + ?Sized,
{
    let contract = ContractId::from(record.contract("ft")?);
    let ft = metadata
        .ft_data(&contract)
        .await
        .map_err(|cause| DecodeError::Lookup {
            contract: contract.to_string(),
            cause,
        })?;

    Ok((AssetDescriptor::new(&contract, &ft.asset_name), ft))
}

async fn resolve_nft<M>(record: &SwapRecord, metadata: &M) -> Result<AssetDescriptor, DecodeError>
where
    M: TokenMetadata + ?Sized,
{
    let contract = ContractId::from(record.contract("nft")?);
    let nft = metadata
        .nft_data(&contract)
        .await
        .map_err(|cause| DecodeError::Lookup {
            contract: contract.to_string(),
            cause,
        })?;

    Ok(AssetDescriptor::new(&contract, nft.asset_name))
}

/// Fee tier of the record's `fees` contract.
///
/// An unknown contract is reported and mapped to the default tier; the
/// returned flag tells the two cases apart.
fn resolve_fee(record: &SwapRecord, registry: FeeRegistry) -> Result<(String, bool), DecodeError> {
    let fees = record.contract("fees")?;
    let address = fees.issuer.to_string();

    match registry.find_by_contract(&address, &fees.name) {
        Some(tier) => Ok((tier.id.to_string(), false)),
        None => {
            warn!(
                fee_contract = %fees,
                registry = ?registry,
                fallback = DEFAULT_FEE_ID,
                "fee contract not in registry"
            );
            Ok((DEFAULT_FEE_ID.to_string(), true))
        }
    }
}

#[instrument(skip(record, metadata), fields(swap_type = %swap_type))]
pub async fn decode_swap_record<M>(
    record: &SwapRecord,
    swap_type: &SwapType,
    metadata: &M,
    network: BtcNetwork,
) -> Result<FormState, DecodeError>
where
    M: TokenMetadata + ?Sized,
{
    if !is_supported(swap_type) {
        warn!("unsupported swap type");
        return Err(DecodeError::UnsupportedType(swap_type.to_string()));
    }

    let when = record.uint_u64("when")?;
    let done = done_flag(record)?;

    let btc_recipient = if swap_type.is_atomic() {
        None
    } else {
        Some(pubscript_to_btc_address(
            record.buffer("btc-receiver")?,
            network,
        )?)
    };

    let mut form = FormState {
        btc_recipient,
        amount_sats: Some(counter_amount(record, swap_type)?),
        when_from_swap: Some(when),
        done_from_swap: Some(done),
        ..FormState::default()
    };

    match swap_type {
        SwapType::Ft => {
            let (asset, ft) = resolve_ft(record, metadata).await?;
            let recipient = record.optional_principal("ft-receiver")?;

            form.asset_trait = Some(asset.to_string());
            form.amount = Some(scale_decimals(record.uint("amount")?, ft.decimals)?);
            form.asset_recipient = recipient.clone();
            form.asset_recipient_from_swap = recipient;
            form.asset_sender_from_swap = Some(record.principal("ft-sender")?);
        }
        SwapType::Stx => {
            let recipient = record.optional_principal("stx-receiver")?;

            form.amount = Some(scale_decimals(record.uint("ustx")?, STX_DECIMALS)?);
            form.asset_recipient = recipient.clone();
            form.asset_recipient_from_swap = recipient;
            form.asset_sender_from_swap = Some(record.principal("stx-sender")?);
        }
        SwapType::Nft => {
            let asset = resolve_nft(record, metadata).await?;
            let recipient = record.optional_principal("nft-receiver")?;

            form.asset_trait = Some(asset.to_string());
            form.nft_id = Some(record.uint("nft-id")?);
            form.asset_recipient = recipient.clone();
            form.asset_recipient_from_swap = recipient;
            form.asset_sender_from_swap = Some(record.principal("nft-sender")?);
        }
        SwapType::StxFt | SwapType::StxNft => {
            let registry = fee_registry_for(swap_type)
                .ok_or_else(|| DecodeError::UnsupportedType(swap_type.to_string()))?;
            let (fee_id, fee_fallback) = resolve_fee(record, registry)?;

            if *swap_type == SwapType::StxFt {
                let (asset, ft) = resolve_ft(record, metadata).await?;
                form.asset_trait = Some(asset.to_string());
                form.amount = Some(scale_decimals(record.uint("amount")?, ft.decimals)?);
                form.asset_sender_from_swap = Some(record.principal("ft-sender")?);
            } else {
                let asset = resolve_nft(record, metadata).await?;
                form.asset_trait = Some(asset.to_string());
                form.nft_id = Some(record.uint("nft-id")?);
                form.asset_sender_from_swap = Some(record.principal("nft-sender")?);
            }

            let stx_sender = record.principal("stx-sender")?;
            form.asset_recipient = Some(stx_sender.clone());
            form.asset_recipient_from_swap = Some(stx_sender);
            form.fee_id = Some(fee_id);
            form.fee_fallback = fee_fallback;
        }
        SwapType::Other(other) => return Err(DecodeError::UnsupportedType(other.clone())),
    }

    debug!(done = done, when = when, "swap record decoded");
    Ok(form)
}
