//! Clarity values as returned by Stacks nodes.
//!
//! Nodes answer map reads and read-only calls with hex-encoded values in the
//! consensus serialization (see `codec`). `ClarityValue` is the decoded form;
//! its `Display` impl follows the usual Clarity repr (`u5`, `(some …)`,
//! `SP….contract`) so values can be compared as strings the same way the
//! wallet tooling does.

pub mod c32;
mod codec;
mod principal;

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub use principal::{ContractPrincipal, MAX_CONTRACT_NAME_LEN, StandardPrincipal};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClarityError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unknown type prefix 0x{0:02x}")]
    UnknownPrefix(u8),

    #[error("invalid utf-8 string")]
    InvalidUtf8,

    #[error("string-ascii contains non-ascii bytes")]
    InvalidAscii,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("hex decode failed: {0}")]
    Hex(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("address checksum mismatch: {0}")]
    BadChecksum(String),

    #[error("address version {0} out of range")]
    InvalidVersion(u8),

    #[error("invalid contract name: {0:?}")]
    InvalidContractName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Buffer(Vec<u8>),
    Bool(bool),
    StandardPrincipal(StandardPrincipal),
    ContractPrincipal(ContractPrincipal),
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(BTreeMap<String, ClarityValue>),
    StringAscii(String),
    StringUtf8(String),
}

impl ClarityValue {
    pub fn some(inner: ClarityValue) -> Self {
        Self::OptionalSome(Box::new(inner))
    }

    pub fn ok(inner: ClarityValue) -> Self {
        Self::ResponseOk(Box::new(inner))
    }

    pub fn err(inner: ClarityValue) -> Self {
        Self::ResponseErr(Box::new(inner))
    }

    pub fn tuple<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ClarityValue)>,
    {
        Self::Tuple(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Short name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Buffer(_) => "buffer",
            Self::Bool(_) => "bool",
            Self::StandardPrincipal(_) => "principal",
            Self::ContractPrincipal(_) => "contract-principal",
            Self::ResponseOk(_) => "response-ok",
            Self::ResponseErr(_) => "response-err",
            Self::OptionalNone => "none",
            Self::OptionalSome(_) => "some",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::StringAscii(_) => "string-ascii",
            Self::StringUtf8(_) => "string-utf8",
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Self::UInt(v) => Some(*v),
            Self::Int(v) => u128::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringAscii(s) | Self::StringUtf8(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&BTreeMap<String, ClarityValue>> {
        match self {
            Self::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// Principal rendered as an address, looking through `(some p)`.
    ///
    /// `none` and non-principal values yield `None`.
    pub fn as_principal_string(&self) -> Option<String> {
        match self {
            Self::StandardPrincipal(p) => Some(p.to_string()),
            Self::ContractPrincipal(p) => Some(p.to_string()),
            Self::OptionalSome(inner) => inner.as_principal_string(),
            _ => None,
        }
    }

    /// `(ok v)` → `Some(v)`; `(err …)` and everything else → `None`.
    pub fn into_ok(self) -> Option<ClarityValue> {
        match self {
            Self::ResponseOk(v) => Some(*v),
            _ => None,
        }
    }

    /// `(some v)` → `Some(v)`; `none` and everything else → `None`.
    pub fn into_some(self) -> Option<ClarityValue> {
        match self {
            Self::OptionalSome(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.serialize()))
    }

    /// Decode a hex payload, with or without the `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, ClarityError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| ClarityError::Hex(e.to_string()))?;
        Self::deserialize(&bytes)
    }
}

impl From<u128> for ClarityValue {
    fn from(v: u128) -> Self {
        Self::UInt(v)
    }
}

impl From<bool> for ClarityValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<StandardPrincipal> for ClarityValue {
    fn from(p: StandardPrincipal) -> Self {
        Self::StandardPrincipal(p)
    }
}

impl From<ContractPrincipal> for ClarityValue {
    fn from(p: ContractPrincipal) -> Self {
        Self::ContractPrincipal(p)
    }
}

impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "u{v}"),
            Self::Buffer(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::StandardPrincipal(p) => write!(f, "{p}"),
            Self::ContractPrincipal(p) => write!(f, "{p}"),
            Self::ResponseOk(v) => write!(f, "(ok {v})"),
            Self::ResponseErr(v) => write!(f, "(err {v})"),
            Self::OptionalNone => f.write_str("none"),
            Self::OptionalSome(v) => write!(f, "(some {v})"),
            Self::List(items) => {
                f.write_str("(list")?;
                for item in items {
                    write!(f, " {item}")?;
                }
                f.write_str(")")
            }
            Self::Tuple(entries) => {
                f.write_str("(tuple")?;
                for (k, v) in entries {
                    write!(f, " ({k} {v})")?;
                }
                f.write_str(")")
            }
            Self::StringAscii(s) => write!(f, "{s:?}"),
            Self::StringUtf8(s) => write!(f, "u{s:?}"),
        }
    }
}
