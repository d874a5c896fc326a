//! Display helpers for NFTs: image url and human-readable owner.

use anyhow::Context;
use corelib::{ClarityValue, ContractId};
use serde_json::Value;
use tracing::{debug, warn};

use super::api::StacksApi;

pub const IPFS_GATEWAY: &str = "https://gateway.pinata.cloud/ipfs/";

pub fn ipfs_to_gateway(url: &str) -> String {
    url.replace("ipfs://", IPFS_GATEWAY)
}

/// SIP-009 token uris may carry an `{id}` placeholder.
pub fn expand_token_uri(uri: &str, nft_id: u128) -> String {
    uri.replace("{id}", &nft_id.to_string())
}

/// `(ok (some "<uri>"))` → the uri.
pub fn token_uri(value: ClarityValue) -> Option<String> {
    value
        .into_ok()?
        .into_some()?
        .as_str()
        .map(str::to_string)
}

/// `image`, falling back to `properties.image`.
pub fn metadata_image(metadata: &Value) -> Option<&str> {
    metadata
        .get("image")
        .and_then(Value::as_str)
        .or_else(|| metadata.pointer("/properties/image").and_then(Value::as_str))
}

/// Resolve the image url of `nft_id`, or `None` when the contract has no uri for it.
pub async fn resolve_image_for_nft<A>(
    api: &A,
    contract: &ContractId,
    nft_id: u128,
) -> anyhow::Result<Option<String>>
where
    A: StacksApi + ?Sized,
{
    let uri_cv = api
        .call_read_only(contract, "get-token-uri", &[ClarityValue::UInt(nft_id)])
        .await?;

    let Some(uri) = token_uri(uri_cv) else {
        debug!(contract = %contract, nft_id = %nft_id, "no token uri");
        return Ok(None);
    };

    let url = ipfs_to_gateway(&expand_token_uri(&uri, nft_id));
    debug!(url = %url, "fetching token metadata");

    let metadata = api
        .fetch_json(&url)
        .await
        .with_context(|| format!("failed to load metadata for {contract} #{nft_id}"))?;

    let image = metadata_image(&metadata)
        .with_context(|| format!("metadata at {url} has no image"))?;

    Ok(Some(ipfs_to_gateway(image)))
}

/// Owner of `nft_id` as a BNS name when one exists, else as an address.
///
/// A failing name lookup degrades to the plain address.
pub async fn resolve_owner_for_nft<A>(
    api: &A,
    contract: &ContractId,
    nft_id: u128,
) -> anyhow::Result<Option<String>>
where
    A: StacksApi + ?Sized,
{
    let owner_cv = api
        .call_read_only(contract, "get-owner", &[ClarityValue::UInt(nft_id)])
        .await?;

    let Some(owner) = owner_cv
        .into_ok()
        .and_then(ClarityValue::into_some)
        .and_then(|p| p.as_principal_string())
    else {
        debug!(contract = %contract, nft_id = %nft_id, "token has no owner");
        return Ok(None);
    };

    match api.names_by_address(&owner).await {
        Ok(names) => Ok(Some(names.into_iter().next().unwrap_or(owner))),
        Err(e) => {
            warn!(error = ?e, owner = %owner, "bns lookup failed, showing address");
            Ok(Some(owner))
        }
    }
}
