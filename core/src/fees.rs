//! Fee contracts used by atomic swaps, by symbolic tier.

use crate::swap_type::SwapType;

/// Tier reported when a record's fee contract is not in the registry.
pub const DEFAULT_FEE_ID: &str = "stx";

const FEE_DEPLOYER: &str = "SP2CY5V39NHDPWSXMW9QDT3HC3GD6Q7RDAFCABJSE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeContract {
    pub id: &'static str,
    pub address: &'static str,
    pub name: &'static str,
}

pub static FT_FEE_CONTRACTS: &[FeeContract] = &[
    FeeContract {
        id: "stx",
        address: FEE_DEPLOYER,
        name: "stx-fixed-fee",
    },
    FeeContract {
        id: "stx-proportional",
        address: FEE_DEPLOYER,
        name: "stx-proportional-fee",
    },
    FeeContract {
        id: "banana",
        address: FEE_DEPLOYER,
        name: "banana-fixed-fee",
    },
    FeeContract {
        id: "usda",
        address: FEE_DEPLOYER,
        name: "usda-fixed-fee",
    },
    FeeContract {
        id: "xbtc",
        address: FEE_DEPLOYER,
        name: "xbtc-fixed-fee",
    },
];

pub static NFT_FEE_CONTRACTS: &[FeeContract] = &[
    FeeContract {
        id: "stx",
        address: FEE_DEPLOYER,
        name: "stx-nft-fixed-fee",
    },
    FeeContract {
        id: "banana",
        address: FEE_DEPLOYER,
        name: "banana-nft-fixed-fee",
    },
    FeeContract {
        id: "satoshible",
        address: FEE_DEPLOYER,
        name: "satoshible-nft-fixed-fee",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeRegistry {
    Ft,
    Nft,
}

impl FeeRegistry {
    pub fn contracts(&self) -> &'static [FeeContract] {
        match self {
            FeeRegistry::Ft => FT_FEE_CONTRACTS,
            FeeRegistry::Nft => NFT_FEE_CONTRACTS,
        }
    }

    /// Reverse lookup: which tier does this contract belong to.
    pub fn find_by_contract(&self, address: &str, name: &str) -> Option<&'static FeeContract> {
        self.contracts()
            .iter()
            .find(|c| c.address == address && c.name == name)
    }

    pub fn by_id(&self, id: &str) -> Option<&'static FeeContract> {
        self.contracts().iter().find(|c| c.id == id)
    }
}

/// Registry consulted for a swap type; only atomic token swaps pay fees.
pub fn fee_registry_for(swap_type: &SwapType) -> Option<FeeRegistry> {
    match swap_type {
        SwapType::StxFt => Some(FeeRegistry::Ft),
        SwapType::StxNft => Some(FeeRegistry::Nft),
        _ => None,
    }
}

/// Tiers a user can pick when creating a swap of this type.
pub fn fee_options(swap_type: &SwapType) -> Vec<&'static str> {
    fee_registry_for(swap_type)
        .map(|r| r.contracts().iter().map(|c| c.id).collect())
        .unwrap_or_default()
}
