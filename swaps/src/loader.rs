use adapters::stacks::{StacksApi, TokenMetadata};
use corelib::{BtcNetwork, FormState, SwapType};
use tracing::{info, instrument, warn};

use crate::decoder::{decode_swap_record, is_supported};
use crate::error::{DecodeError, SwapLoadError};

/// Fetch entry `id` of the `swap_type` contract and decode it.
///
/// Unsupported types are rejected before any network traffic.
#[instrument(skip(api), fields(swap_type = %swap_type))]
pub async fn load_swap<A>(
    api: &A,
    swap_type: &SwapType,
    id: u64,
    network: BtcNetwork,
) -> Result<FormState, SwapLoadError>
where
    A: StacksApi + TokenMetadata + ?Sized,
{
    if !is_supported(swap_type) {
        warn!("unsupported swap type, not fetching");
        return Err(DecodeError::UnsupportedType(swap_type.to_string()).into());
    }

    let record = api
        .swap_entry(swap_type, id)
        .await
        .map_err(SwapLoadError::Fetch)?
        .ok_or_else(|| SwapLoadError::NotFound {
            swap_type: swap_type.to_string(),
            id,
        })?;

    let form = decode_swap_record(&record, swap_type, api, network).await?;
    info!(done = form.is_done(), "swap loaded");

    Ok(form)
}
