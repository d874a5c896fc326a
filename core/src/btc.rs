//! Bitcoin output scripts stored in swap records.

use bitcoin::{Address, Network, ScriptBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BtcScriptError {
    #[error("empty output script")]
    Empty,

    #[error("script has no address form: {0}")]
    NoAddress(#[from] bitcoin::address::FromScriptError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BtcNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl BtcNetwork {
    fn network(self) -> Network {
        match self {
            BtcNetwork::Mainnet => Network::Bitcoin,
            BtcNetwork::Testnet => Network::Testnet,
        }
    }
}

/// Render a scriptPubKey as the address a wallet would pay to.
pub fn pubscript_to_btc_address(script: &[u8], network: BtcNetwork) -> Result<String, BtcScriptError> {
    if script.is_empty() {
        return Err(BtcScriptError::Empty);
    }

    let script = ScriptBuf::from_bytes(script.to_vec());
    let address = Address::from_script(&script, network.network())?;
    Ok(address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p2pkh(hash: [u8; 20]) -> Vec<u8> {
        let mut s = vec![0x76, 0xa9, 0x14];
        s.extend_from_slice(&hash);
        s.extend_from_slice(&[0x88, 0xac]);
        s
    }

    #[test]
    fn p2pkh_mainnet() {
        assert_eq!(
            pubscript_to_btc_address(&p2pkh([0u8; 20]), BtcNetwork::Mainnet).unwrap(),
            "1111111111111111111114oLvT2"
        );
    }

    #[test]
    fn p2pkh_testnet_uses_testnet_prefix() {
        let addr = pubscript_to_btc_address(&p2pkh([0u8; 20]), BtcNetwork::Testnet).unwrap();
        assert!(addr.starts_with('m') || addr.starts_with('n'), "{addr}");
    }

    #[test]
    fn op_return_has_no_address() {
        let err = pubscript_to_btc_address(&[0x6a, 0x01, 0x00], BtcNetwork::Mainnet).unwrap_err();
        assert!(matches!(err, BtcScriptError::NoAddress(_)));
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(
            pubscript_to_btc_address(&[], BtcNetwork::Mainnet),
            Err(BtcScriptError::Empty)
        ));
    }
}
