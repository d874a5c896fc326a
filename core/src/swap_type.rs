//! Swap type tags and the counter-asset table derived from them.
//!
//! A tag is either a plain asset kind (`ft`, `stx`, `nft`), meaning the asset
//! is sold for BTC, or a composite `<counter>-<asset>` tag for atomic swaps
//! settled entirely on the Stacks chain.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SwapType {
    Ft,
    Stx,
    Nft,
    StxFt,
    StxNft,
    Other(String),
}

impl SwapType {
    pub fn as_str(&self) -> &str {
        match self {
            SwapType::Ft => "ft",
            SwapType::Stx => "stx",
            SwapType::Nft => "nft",
            SwapType::StxFt => "stx-ft",
            SwapType::StxNft => "stx-nft",
            SwapType::Other(tag) => tag,
        }
    }

    pub fn is_atomic(&self) -> bool {
        is_atomic(self.as_str())
    }

    pub fn counter_asset(&self) -> CounterAsset {
        counter_asset(self.as_str())
    }

    pub fn scaling_factor(&self) -> u64 {
        scaling_factor(self.as_str())
    }

    pub fn amount_field_name(&self) -> &'static str {
        amount_field_name(self.as_str())
    }

    pub fn contract_name(&self) -> String {
        swap_contract_name(self.as_str())
    }
}

impl From<&str> for SwapType {
    fn from(tag: &str) -> Self {
        match tag {
            "ft" => SwapType::Ft,
            "stx" => SwapType::Stx,
            "nft" => SwapType::Nft,
            "stx-ft" => SwapType::StxFt,
            "stx-nft" => SwapType::StxNft,
            other => SwapType::Other(other.to_string()),
        }
    }
}

impl From<String> for SwapType {
    fn from(tag: String) -> Self {
        SwapType::from(tag.as_str())
    }
}

impl From<SwapType> for String {
    fn from(t: SwapType) -> Self {
        t.as_str().to_string()
    }
}

impl FromStr for SwapType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SwapType::from(s))
    }
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset the swapped asset is paid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CounterAsset {
    Btc,
    Stx,
    Banana,
    Usda,
    Xbtc,
    Satoshible,
}

impl CounterAsset {
    pub fn symbol(&self) -> &'static str {
        match self {
            CounterAsset::Btc => "BTC",
            CounterAsset::Stx => "STX",
            CounterAsset::Banana => "BANANA",
            CounterAsset::Usda => "USDA",
            CounterAsset::Xbtc => "xBTC",
            CounterAsset::Satoshible => "SATOSHIBLE",
        }
    }

    pub fn decimals(&self) -> u32 {
        match self {
            CounterAsset::Stx | CounterAsset::Banana | CounterAsset::Usda => 6,
            CounterAsset::Xbtc | CounterAsset::Btc | CounterAsset::Satoshible => 8,
        }
    }

    pub fn scaling_factor(&self) -> u64 {
        10u64.pow(self.decimals())
    }

    /// Record field holding the counter-asset amount in raw units.
    pub fn amount_field(&self) -> &'static str {
        match self {
            CounterAsset::Stx | CounterAsset::Usda | CounterAsset::Xbtc => "ustx",
            CounterAsset::Banana => "ubanana",
            CounterAsset::Btc | CounterAsset::Satoshible => "sats",
        }
    }
}

/// Ordered most-specific first; the first matching prefix wins.
const PREFIX_TABLE: &[(&str, CounterAsset)] = &[
    ("stx-", CounterAsset::Stx),
    ("banana-", CounterAsset::Banana),
    ("usda-", CounterAsset::Usda),
    ("xbtc-", CounterAsset::Xbtc),
    ("satoshible-", CounterAsset::Satoshible),
];

/// True for composite `<counter>-<asset>` tags.
pub fn is_atomic(tag: &str) -> bool {
    matches!(tag.find('-'), Some(pos) if pos > 0)
}

pub fn counter_asset(tag: &str) -> CounterAsset {
    PREFIX_TABLE
        .iter()
        .find(|(prefix, _)| tag.starts_with(prefix))
        .map(|(_, asset)| *asset)
        .unwrap_or(CounterAsset::Btc)
}

pub fn counter_asset_symbol(tag: &str) -> &'static str {
    counter_asset(tag).symbol()
}

pub fn counter_asset_decimals(tag: &str) -> u32 {
    counter_asset(tag).decimals()
}

pub fn scaling_factor(tag: &str) -> u64 {
    counter_asset(tag).scaling_factor()
}

pub fn amount_field_name(tag: &str) -> &'static str {
    counter_asset(tag).amount_field()
}

/// Leading token of an atomic tag (`stx` for `stx-ft`), `btc` otherwise.
pub fn counter_asset_type(tag: &str) -> &str {
    if is_atomic(tag) {
        tag.split('-').next().unwrap_or(tag)
    } else {
        "btc"
    }
}

/// Escrow contract holding the records of this swap type.
pub fn swap_contract_name(tag: &str) -> String {
    if is_atomic(tag) {
        format!("{tag}-swap")
    } else {
        format!("btc-{tag}-swap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_needs_separator_after_first_char() {
        assert!(!is_atomic("ft"));
        assert!(!is_atomic("stx"));
        assert!(is_atomic("stx-ft"));
        assert!(is_atomic("xbtc-nft"));
        assert!(!is_atomic("-ft"));
        assert!(!is_atomic(""));
    }

    #[test]
    fn prefix_table_rows() {
        assert_eq!(counter_asset_symbol("stx-ft"), "STX");
        assert_eq!(counter_asset_symbol("banana-nft"), "BANANA");
        assert_eq!(counter_asset_symbol("usda-ft"), "USDA");
        assert_eq!(counter_asset_symbol("xbtc-ft"), "xBTC");
        assert_eq!(counter_asset_symbol("satoshible-nft"), "SATOSHIBLE");
        assert_eq!(counter_asset_symbol("ft"), "BTC");
        assert_eq!(counter_asset_symbol("stx"), "BTC");

        assert_eq!(scaling_factor("stx-ft"), 1_000_000);
        assert_eq!(scaling_factor("banana-ft"), 1_000_000);
        assert_eq!(scaling_factor("usda-nft"), 1_000_000);
        assert_eq!(scaling_factor("xbtc-ft"), 100_000_000);
        assert_eq!(scaling_factor("nft"), 100_000_000);

        assert_eq!(amount_field_name("stx-nft"), "ustx");
        assert_eq!(amount_field_name("banana-ft"), "ubanana");
        assert_eq!(amount_field_name("usda-ft"), "ustx");
        assert_eq!(amount_field_name("xbtc-ft"), "ustx");
        assert_eq!(amount_field_name("nft"), "sats");
    }

    #[test]
    fn bare_stx_tag_is_priced_in_btc() {
        // `stx` sells STX for BTC; only `stx-` tags are paid in STX.
        assert_eq!(counter_asset("stx"), CounterAsset::Btc);
        assert_eq!(scaling_factor("stx"), 100_000_000);
        assert_eq!(amount_field_name("stx"), "sats");
    }

    #[test]
    fn counter_asset_type_and_contract() {
        assert_eq!(counter_asset_type("stx-nft"), "stx");
        assert_eq!(counter_asset_type("ft"), "btc");
        assert_eq!(swap_contract_name("ft"), "btc-ft-swap");
        assert_eq!(swap_contract_name("stx-nft"), "stx-nft-swap");
    }

    #[test]
    fn tags_round_trip_through_enum() {
        for tag in ["ft", "stx", "nft", "stx-ft", "stx-nft", "banana-ft"] {
            assert_eq!(SwapType::from(tag).as_str(), tag);
        }
        assert_eq!(SwapType::from("stx-ft"), SwapType::StxFt);
        assert_eq!(
            SwapType::from("banana-ft"),
            SwapType::Other("banana-ft".into())
        );
    }
}
