use std::fmt;
use std::str::FromStr;

use super::{ClarityError, c32};

/// Longest contract name the chain accepts.
pub const MAX_CONTRACT_NAME_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardPrincipal {
    pub version: u8,
    pub hash160: [u8; 20],
}

impl StandardPrincipal {
    pub fn new(version: u8, hash160: [u8; 20]) -> Self {
        Self { version, hash160 }
    }

    pub fn to_address(&self) -> Result<String, ClarityError> {
        c32::c32_address(self.version, &self.hash160)
    }
}

impl fmt::Display for StandardPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_address() {
            Ok(addr) => f.write_str(&addr),
            // Versions >= 32 can only come from a corrupt payload.
            Err(_) => write!(f, "<invalid principal v{}>", self.version),
        }
    }
}

impl FromStr for StandardPrincipal {
    type Err = ClarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (version, hash160) = c32::c32_address_decode(s)?;
        Ok(Self { version, hash160 })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractPrincipal {
    pub issuer: StandardPrincipal,
    pub name: String,
}

impl ContractPrincipal {
    pub fn new(issuer: StandardPrincipal, name: impl Into<String>) -> Result<Self, ClarityError> {
        let name = name.into();
        if name.is_empty() || name.len() > MAX_CONTRACT_NAME_LEN || !name.is_ascii() {
            return Err(ClarityError::InvalidContractName(name));
        }
        Ok(Self { issuer, name })
    }
}

impl fmt::Display for ContractPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.issuer, self.name)
    }
}

impl FromStr for ContractPrincipal {
    type Err = ClarityError;

    /// Parses `<address>.<contract-name>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, name) = s
            .split_once('.')
            .ok_or_else(|| ClarityError::InvalidAddress(s.to_string()))?;
        Self::new(address.parse()?, name)
    }
}
