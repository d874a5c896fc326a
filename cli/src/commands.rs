use std::sync::Arc;

use adapters::stacks::{StacksApi, StacksClient, nft};
use anyhow::Context;
use corelib::{ContractId, SwapType, fees::fee_options};
use serde::Serialize;
use serde_json::json;
use swaps::{SwapContainer, SwapParams, decoder::is_supported};
use tracing::{Instrument, info};

use crate::cli::Command;
use crate::config::AppConfig;
use common::logger::child_span;

pub async fn run(command: Command, client: Arc<StacksClient>, cfg: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Height => {
            let height = client.block_height().await?;
            print_json(&json!({ "blockHeight": height }))
        }
        Command::Classify { swap_type } => print_json(&classify(&swap_type)),
        Command::Swap {
            swap_type,
            id,
            owner,
        } => {
            let container = SwapContainer::new(client, owner, cfg.network);
            let mount = container.mount();

            let load = container
                .set_params(SwapParams::existing(swap_type.as_str(), id))
                .instrument(child_span("load"))
                .await;
            if let Some(load) = load {
                load.await?;
            }
            mount.await?;

            let snapshot = container.snapshot().await;
            info!(view = ?snapshot.view, "swap view ready");
            print_json(&snapshot)
        }
        Command::NftImage { contract, id } => {
            let contract: ContractId = contract.parse()?;
            let image = nft::resolve_image_for_nft(client.as_ref(), &contract, id)
                .await
                .with_context(|| format!("failed to resolve image of {contract} #{id}"))?;
            print_json(&json!({ "contract": contract.to_string(), "id": id.to_string(), "image": image }))
        }
        Command::NftOwner { contract, id } => {
            let contract: ContractId = contract.parse()?;
            let owner = nft::resolve_owner_for_nft(client.as_ref(), &contract, id)
                .await
                .with_context(|| format!("failed to resolve owner of {contract} #{id}"))?;
            print_json(&json!({ "contract": contract.to_string(), "id": id.to_string(), "owner": owner }))
        }
    }
}

pub fn classify(tag: &str) -> serde_json::Value {
    let swap_type = SwapType::from(tag);
    let counter = swap_type.counter_asset();

    json!({
        "type": swap_type.as_str(),
        "supported": is_supported(&swap_type),
        "atomic": swap_type.is_atomic(),
        "counterAsset": counter.symbol(),
        "counterAssetDecimals": counter.decimals(),
        "scalingFactor": swap_type.scaling_factor(),
        "amountField": swap_type.amount_field_name(),
        "contract": swap_type.contract_name(),
        "feeOptions": fee_options(&swap_type),
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_atomic_stx_ft() {
        let v = classify("stx-ft");

        assert_eq!(v["atomic"], true);
        assert_eq!(v["supported"], true);
        assert_eq!(v["counterAsset"], "STX");
        assert_eq!(v["scalingFactor"], 1_000_000);
        assert_eq!(v["amountField"], "ustx");
        assert_eq!(v["contract"], "stx-ft-swap");
        assert_eq!(v["feeOptions"][0], "stx");
    }

    #[test]
    fn classify_btc_swap() {
        let v = classify("nft");

        assert_eq!(v["atomic"], false);
        assert_eq!(v["counterAsset"], "BTC");
        assert_eq!(v["amountField"], "sats");
        assert_eq!(v["contract"], "btc-nft-swap");
        assert_eq!(v["feeOptions"], json!([]));
    }

    #[test]
    fn classify_unknown_composite() {
        let v = classify("banana-nft");

        assert_eq!(v["supported"], false);
        assert_eq!(v["counterAsset"], "BANANA");
        assert_eq!(v["amountField"], "ubanana");
    }
}
