//! Asset identifiers of the form `<issuer>.<contract>::<asset>`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::clarity::{ClarityError, ClarityValue, ContractPrincipal};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("empty asset identifier")]
    Empty,

    #[error("missing `.<contract>` in {0:?}")]
    MissingContract(String),

    #[error("missing `::<asset>` in {0:?}")]
    MissingAssetName(String),

    #[error(transparent)]
    Principal(#[from] ClarityError),
}

/// `<address>.<contract-name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractId {
    pub address: String,
    pub name: String,
}

impl ContractId {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    pub fn to_principal(&self) -> Result<ContractPrincipal, ClarityError> {
        ContractPrincipal::new(self.address.parse()?, self.name.clone())
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

impl FromStr for ContractId {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AssetError::Empty);
        }
        match s.split_once('.') {
            Some((address, name)) if !address.is_empty() && !name.is_empty() => {
                Ok(Self::new(address, name))
            }
            _ => Err(AssetError::MissingContract(s.to_string())),
        }
    }
}

impl From<&ContractPrincipal> for ContractId {
    fn from(p: &ContractPrincipal) -> Self {
        Self::new(p.issuer.to_string(), p.name.clone())
    }
}

/// Fully qualified fungible or non-fungible asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetDescriptor {
    pub issuer: String,
    pub contract_name: String,
    pub asset_name: String,
}

impl AssetDescriptor {
    pub fn new(contract: &ContractId, asset_name: impl Into<String>) -> Self {
        Self {
            issuer: contract.address.clone(),
            contract_name: contract.name.clone(),
            asset_name: asset_name.into(),
        }
    }

    pub fn contract_id(&self) -> ContractId {
        ContractId::new(self.issuer.clone(), self.contract_name.clone())
    }

    /// The asset's contract as a Clarity argument.
    pub fn contract_principal(&self) -> Result<ClarityValue, ClarityError> {
        Ok(ClarityValue::ContractPrincipal(
            self.contract_id().to_principal()?,
        ))
    }
}

impl fmt::Display for AssetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}::{}",
            self.issuer, self.contract_name, self.asset_name
        )
    }
}

impl FromStr for AssetDescriptor {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (contract, asset_name) = s
            .split_once("::")
            .ok_or_else(|| AssetError::MissingAssetName(s.to_string()))?;

        if asset_name.is_empty() {
            return Err(AssetError::MissingAssetName(s.to_string()));
        }

        let contract: ContractId = contract.parse()?;
        Ok(Self::new(&contract, asset_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";

    #[test]
    fn splits_into_components() {
        let a: AssetDescriptor = format!("{ISSUER}.arkadiko-token::diko").parse().unwrap();
        assert_eq!(a.issuer, ISSUER);
        assert_eq!(a.contract_name, "arkadiko-token");
        assert_eq!(a.asset_name, "diko");
        assert_eq!(a.to_string(), format!("{ISSUER}.arkadiko-token::diko"));
    }

    #[test]
    fn contract_principal_uses_issuer_and_contract() {
        let a: AssetDescriptor = format!("{ISSUER}.arkadiko-token::diko").parse().unwrap();
        let cv = a.contract_principal().unwrap();
        assert_eq!(cv.to_string(), format!("{ISSUER}.arkadiko-token"));
    }

    #[test]
    fn rejects_partial_identifiers() {
        assert!(matches!(
            format!("{ISSUER}.arkadiko-token").parse::<AssetDescriptor>(),
            Err(AssetError::MissingAssetName(_))
        ));
        assert!(matches!(
            format!("{ISSUER}::diko").parse::<AssetDescriptor>(),
            Err(AssetError::MissingContract(_))
        ));
        assert!(matches!(
            format!("{ISSUER}.arkadiko-token::").parse::<AssetDescriptor>(),
            Err(AssetError::MissingAssetName(_))
        ));
        assert_eq!("".parse::<ContractId>(), Err(AssetError::Empty));
    }
}
