use corelib::ClarityValue;
use serde::{Deserialize, Serialize};

use super::errors::StacksError;

/// `GET /v2/info`
#[derive(Debug, Deserialize)]
pub struct CoreInfo {
    pub stacks_tip_height: u64,

    #[serde(default)]
    pub burn_block_height: Option<u64>,

    #[serde(default)]
    pub network_id: Option<u32>,
}

/// `POST /v2/map_entry/...`
#[derive(Debug, Deserialize)]
pub struct MapEntryResponse {
    pub data: String,

    #[serde(default)]
    pub proof: Option<String>,
}

/// Body of `POST /v2/contracts/call-read/...`
#[derive(Debug, Serialize)]
pub struct ReadOnlyRequest {
    pub sender: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReadOnlyResponse {
    pub okay: bool,

    #[serde(default)]
    pub result: Option<String>,

    #[serde(default)]
    pub cause: Option<String>,
}

impl ReadOnlyResponse {
    pub fn into_value(self) -> Result<ClarityValue, StacksError> {
        if !self.okay {
            return Err(StacksError::Api {
                cause: self.cause.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        let hex = self
            .result
            .ok_or_else(|| StacksError::InvalidResponse("okay response without result".into()))?;

        Ok(ClarityValue::from_hex(&hex)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct NamedToken {
    pub name: String,
}

/// `GET /v2/contracts/interface/...`, reduced to the token declarations.
#[derive(Debug, Deserialize)]
pub struct ContractInterface {
    #[serde(default)]
    pub fungible_tokens: Vec<NamedToken>,

    #[serde(default)]
    pub non_fungible_tokens: Vec<NamedToken>,
}

impl ContractInterface {
    pub fn first_fungible(&self) -> Option<&str> {
        self.fungible_tokens.first().map(|t| t.name.as_str())
    }

    pub fn first_non_fungible(&self) -> Option<&str> {
        self.non_fungible_tokens.first().map(|t| t.name.as_str())
    }
}

/// `GET {bns}/v1/addresses/stacks/{address}`
#[derive(Debug, Default, Deserialize)]
pub struct NamesResponse {
    #[serde(default)]
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_info_ignores_unknown_fields() {
        let info: CoreInfo = serde_json::from_str(
            r#"{ "peer_version": 402653189, "stacks_tip_height": 150123, "burn_block_height": 800000 }"#,
        )
        .unwrap();
        assert_eq!(info.stacks_tip_height, 150_123);
        assert_eq!(info.burn_block_height, Some(800_000));
    }

    #[test]
    fn read_only_ok_decodes_result() {
        let resp: ReadOnlyResponse = serde_json::from_str(
            r#"{ "okay": true, "result": "0x070100000000000000000000000000000006" }"#,
        )
        .unwrap();
        assert_eq!(
            resp.into_value().unwrap(),
            ClarityValue::ok(ClarityValue::UInt(6))
        );
    }

    #[test]
    fn read_only_failure_carries_cause() {
        let resp: ReadOnlyResponse =
            serde_json::from_str(r#"{ "okay": false, "cause": "Unchecked(NoSuchContract)" }"#)
                .unwrap();
        match resp.into_value() {
            Err(StacksError::Api { cause }) => assert!(cause.contains("NoSuchContract")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn interface_exposes_first_token_names() {
        let iface: ContractInterface = serde_json::from_str(
            r#"{
                "functions": [],
                "fungible_tokens": [{ "name": "diko" }],
                "non_fungible_tokens": []
            }"#,
        )
        .unwrap();
        assert_eq!(iface.first_fungible(), Some("diko"));
        assert_eq!(iface.first_non_fungible(), None);
    }

    #[test]
    fn names_default_to_empty() {
        let names: NamesResponse = serde_json::from_str("{}").unwrap();
        assert!(names.names.is_empty());
    }
}
