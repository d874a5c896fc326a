use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use corelib::{ClarityValue, ContractId, SwapRecord, SwapType};
use reqwest::Client;
use tracing::{debug, instrument};

use super::api::{FtData, NftData, StacksApi, TokenMetadata};
use super::errors::StacksError;
use super::types::{
    ContractInterface, CoreInfo, MapEntryResponse, NamesResponse, ReadOnlyRequest,
    ReadOnlyResponse,
};

/// Map holding swap entries in every swap contract.
pub const SWAPS_MAP: &str = "swaps";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Stacks node / API base url, without trailing slash.
    pub api_url: String,
    /// BNS lookup base url.
    pub bns_url: String,
    /// Deployer of the swap contracts.
    pub swap_deployer: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct StacksClient {
    http: Client,
    cfg: ClientConfig,
}

impl StacksClient {
    pub fn new(mut cfg: ClientConfig) -> Result<Self, StacksError> {
        let http = Client::builder()
            .timeout(cfg.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        cfg.api_url = cfg.api_url.trim_end_matches('/').to_string();
        cfg.bns_url = cfg.bns_url.trim_end_matches('/').to_string();

        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_core_info(&self) -> Result<CoreInfo, StacksError> {
        let url = format!("{}/v2/info", self.cfg.api_url);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let info: CoreInfo = resp.json().await?;

        debug!(height = info.stacks_tip_height, "core info fetched");
        Ok(info)
    }

    #[instrument(skip(self), fields(swap_type = %swap_type, id = id), level = "debug")]
    pub async fn fetch_swap_entry(
        &self,
        swap_type: &SwapType,
        id: u64,
    ) -> Result<Option<SwapRecord>, StacksError> {
        let url = map_entry_url(&self.cfg, swap_type);

        let resp = self
            .http
            .post(&url)
            .json(&map_entry_key(id))
            .send()
            .await?
            .error_for_status()?;
        let entry: MapEntryResponse = resp.json().await?;

        let record = record_from_entry(&entry)?;
        debug!(found = record.is_some(), "swap entry fetched");
        Ok(record)
    }

    #[instrument(skip(self, args), fields(contract = %contract), level = "debug")]
    pub async fn read_only(
        &self,
        contract: &ContractId,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, StacksError> {
        let url = read_only_url(&self.cfg.api_url, contract, function);
        let body = read_only_request(contract, args);

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let out: ReadOnlyResponse = resp.json().await?;

        out.into_value()
    }

    #[instrument(skip(self), fields(contract = %contract), level = "debug")]
    pub async fn fetch_interface(
        &self,
        contract: &ContractId,
    ) -> Result<ContractInterface, StacksError> {
        let url = format!(
            "{}/v2/contracts/interface/{}/{}",
            self.cfg.api_url, contract.address, contract.name
        );
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_names(&self, address: &str) -> Result<NamesResponse, StacksError> {
        let url = format!("{}/v1/addresses/stacks/{}", self.cfg.bns_url, address);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl StacksApi for StacksClient {
    async fn block_height(&self) -> anyhow::Result<u64> {
        Ok(self.fetch_core_info().await?.stacks_tip_height)
    }

    async fn swap_entry(&self, swap_type: &SwapType, id: u64) -> anyhow::Result<Option<SwapRecord>> {
        self.fetch_swap_entry(swap_type, id)
            .await
            .with_context(|| format!("failed to fetch {swap_type} swap {id}"))
    }

    async fn call_read_only(
        &self,
        contract: &ContractId,
        function: &str,
        args: &[ClarityValue],
    ) -> anyhow::Result<ClarityValue> {
        self.read_only(contract, function, args)
            .await
            .with_context(|| format!("read-only call {contract}::{function} failed"))
    }

    async fn names_by_address(&self, address: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.fetch_names(address).await?.names)
    }

    async fn fetch_json(&self, url: &str) -> anyhow::Result<serde_json::Value> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("failed to fetch {url}"))?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl TokenMetadata for StacksClient {
    async fn ft_data(&self, contract: &ContractId) -> anyhow::Result<FtData> {
        let iface = self.fetch_interface(contract).await?;
        let asset_name = fungible_token_name(contract, &iface)?;

        let decimals_cv = self.read_only(contract, "get-decimals", &[]).await?;
        let decimals = decimals_from_result(contract, decimals_cv)?;

        Ok(FtData {
            asset_name,
            decimals,
        })
    }

    async fn nft_data(&self, contract: &ContractId) -> anyhow::Result<NftData> {
        let iface = self.fetch_interface(contract).await?;

        Ok(NftData {
            asset_name: non_fungible_token_name(contract, &iface)?,
        })
    }
}

/// `{api}/v2/map_entry/{deployer}/{swap contract}/swaps?proof=0`
pub fn map_entry_url(cfg: &ClientConfig, swap_type: &SwapType) -> String {
    format!(
        "{}/v2/map_entry/{}/{}/{}?proof=0",
        cfg.api_url,
        cfg.swap_deployer,
        swap_type.contract_name(),
        SWAPS_MAP
    )
}

/// Map key for entry `id`: the hex-serialised `uint`, sent as a JSON string.
pub fn map_entry_key(id: u64) -> String {
    ClarityValue::UInt(id as u128).to_hex()
}

/// `none` data means no entry under that key.
pub fn record_from_entry(entry: &MapEntryResponse) -> Result<Option<SwapRecord>, StacksError> {
    Ok(SwapRecord::from_value(ClarityValue::from_hex(&entry.data)?)?)
}

pub fn read_only_url(api_url: &str, contract: &ContractId, function: &str) -> String {
    format!(
        "{}/v2/contracts/call-read/{}/{}/{}",
        api_url, contract.address, contract.name, function
    )
}

/// The contract itself is the sender of read-only calls.
pub fn read_only_request(contract: &ContractId, args: &[ClarityValue]) -> ReadOnlyRequest {
    ReadOnlyRequest {
        sender: contract.address.clone(),
        arguments: args.iter().map(ClarityValue::to_hex).collect(),
    }
}

/// `get-decimals` must answer `(ok uN)`.
pub fn decimals_from_result(contract: &ContractId, value: ClarityValue) -> Result<u32, StacksError> {
    value
        .into_ok()
        .and_then(|v| v.as_u128())
        .and_then(|d| u32::try_from(d).ok())
        .ok_or_else(|| StacksError::InvalidResponse(format!("{contract}: get-decimals is not (ok uint)")))
}

pub fn fungible_token_name(
    contract: &ContractId,
    iface: &ContractInterface,
) -> Result<String, StacksError> {
    iface
        .first_fungible()
        .map(str::to_string)
        .ok_or_else(|| StacksError::InvalidResponse(format!("{contract} declares no fungible token")))
}

pub fn non_fungible_token_name(
    contract: &ContractId,
    iface: &ContractInterface,
) -> Result<String, StacksError> {
    iface
        .first_non_fungible()
        .map(str::to_string)
        .ok_or_else(|| {
            StacksError::InvalidResponse(format!("{contract} declares no non-fungible token"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::StandardPrincipal;

    const DEPLOYER: &str = "SP2CY5V39NHDPWSXMW9QDT3HC3GD6Q7RDAFCABJSE";

    fn cfg() -> ClientConfig {
        ClientConfig {
            api_url: "https://api.hiro.so".into(),
            bns_url: "https://api.hiro.so".into(),
            swap_deployer: DEPLOYER.into(),
            timeout: Duration::from_secs(10),
        }
    }

    fn token() -> ContractId {
        ContractId::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7", "token-a")
    }

    fn iface(json: &str) -> ContractInterface {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn map_entry_url_targets_swaps_map_of_type_contract() {
        assert_eq!(
            map_entry_url(&cfg(), &SwapType::Nft),
            format!("https://api.hiro.so/v2/map_entry/{DEPLOYER}/btc-nft-swap/swaps?proof=0")
        );
        assert_eq!(
            map_entry_url(&cfg(), &SwapType::StxFt),
            format!("https://api.hiro.so/v2/map_entry/{DEPLOYER}/stx-ft-swap/swaps?proof=0")
        );
    }

    #[test]
    fn map_entry_body_is_json_string_of_uint_key() {
        let body = serde_json::to_string(&map_entry_key(1)).unwrap();
        assert_eq!(body, "\"0x0100000000000000000000000000000001\"");

        let body = serde_json::to_string(&map_entry_key(258)).unwrap();
        assert_eq!(body, "\"0x0100000000000000000000000000000102\"");
    }

    #[test]
    fn entry_data_none_is_absent() {
        let none = MapEntryResponse {
            data: "0x09".into(),
            proof: None,
        };
        assert_eq!(record_from_entry(&none).unwrap(), None);

        let some = MapEntryResponse {
            data: ClarityValue::some(ClarityValue::tuple([("when", ClarityValue::UInt(5))])).to_hex(),
            proof: None,
        };
        let record = record_from_entry(&some).unwrap().unwrap();
        assert_eq!(record.uint("when").unwrap(), 5);
    }

    #[test]
    fn entry_data_must_be_clarity_hex() {
        let bad = MapEntryResponse {
            data: "0xzz".into(),
            proof: None,
        };
        assert!(matches!(record_from_entry(&bad), Err(StacksError::Clarity(_))));
    }

    #[test]
    fn read_only_body_uses_contract_as_sender_and_hex_args() {
        let owner: StandardPrincipal = "SP000000000000000000002Q6VF78".parse().unwrap();
        let req = read_only_request(&token(), &[ClarityValue::UInt(7), owner.into()]);
        let body = serde_json::to_value(&req).unwrap();

        assert_eq!(body["sender"], "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
        assert_eq!(body["arguments"][0], "0x0100000000000000000000000000000007");
        assert_eq!(
            body["arguments"][1],
            "0x05160000000000000000000000000000000000000000"
        );
        assert_eq!(
            read_only_url("http://node", &token(), "get-decimals"),
            "http://node/v2/contracts/call-read/SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7/token-a/get-decimals"
        );
    }

    #[test]
    fn decimals_require_ok_uint() {
        let ok = ClarityValue::ok(ClarityValue::UInt(8));
        assert_eq!(decimals_from_result(&token(), ok).unwrap(), 8);

        for bad in [
            ClarityValue::UInt(8),
            ClarityValue::err(ClarityValue::UInt(8)),
            ClarityValue::ok(ClarityValue::StringAscii("8".into())),
            ClarityValue::ok(ClarityValue::UInt(u64::MAX as u128)),
        ] {
            assert!(matches!(
                decimals_from_result(&token(), bad),
                Err(StacksError::InvalidResponse(_))
            ));
        }
    }

    #[test]
    fn token_names_come_from_first_declaration() {
        let both = iface(
            r#"{ "fungible_tokens": [{ "name": "tok-a" }, { "name": "tok-b" }],
                 "non_fungible_tokens": [{ "name": "punk" }] }"#,
        );
        assert_eq!(fungible_token_name(&token(), &both).unwrap(), "tok-a");
        assert_eq!(non_fungible_token_name(&token(), &both).unwrap(), "punk");

        let empty = iface("{}");
        let err = fungible_token_name(&token(), &empty).unwrap_err();
        assert!(err.to_string().contains("declares no fungible token"));
        assert!(non_fungible_token_name(&token(), &empty).is_err());
    }
}
