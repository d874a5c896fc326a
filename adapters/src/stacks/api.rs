use async_trait::async_trait;
use corelib::{ClarityValue, ContractId, SwapRecord, SwapType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtData {
    pub asset_name: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftData {
    pub asset_name: String,
}

/// Read access to a Stacks node and the services around it.
#[async_trait]
pub trait StacksApi: Send + Sync {
    /// Current Stacks chain tip height.
    async fn block_height(&self) -> anyhow::Result<u64>;

    /// Entry `id` of the swap contract for `swap_type`; `None` if absent.
    async fn swap_entry(&self, swap_type: &SwapType, id: u64) -> anyhow::Result<Option<SwapRecord>>;

    async fn call_read_only(
        &self,
        contract: &ContractId,
        function: &str,
        args: &[ClarityValue],
    ) -> anyhow::Result<ClarityValue>;

    /// BNS names owned by `address`, most relevant first.
    async fn names_by_address(&self, address: &str) -> anyhow::Result<Vec<String>>;

    /// GET an arbitrary JSON document (token metadata).
    async fn fetch_json(&self, url: &str) -> anyhow::Result<serde_json::Value>;
}

/// Name and precision of the token declared by a contract.
#[async_trait]
pub trait TokenMetadata: Send + Sync {
    async fn ft_data(&self, contract: &ContractId) -> anyhow::Result<FtData>;

    async fn nft_data(&self, contract: &ContractId) -> anyhow::Result<NftData>;
}
