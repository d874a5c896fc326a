use std::collections::BTreeMap;

use thiserror::Error;

use crate::clarity::{ClarityValue, ContractPrincipal};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("swap entry is not a tuple (got {0})")]
    NotATuple(&'static str),

    #[error("swap entry has no `{0}` field")]
    MissingField(String),

    #[error("field `{field}`: expected {expected}, got {actual}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field `{field}`: {value} does not fit")]
    OutOfRange { field: String, value: u128 },
}

/// One entry of a swap contract's `swaps` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapRecord {
    fields: BTreeMap<String, ClarityValue>,
}

impl SwapRecord {
    pub fn new(fields: BTreeMap<String, ClarityValue>) -> Self {
        Self { fields }
    }

    /// Map reads answer with an optional: `none` means no such swap.
    pub fn from_value(value: ClarityValue) -> Result<Option<Self>, RecordError> {
        match value {
            ClarityValue::OptionalNone => Ok(None),
            ClarityValue::OptionalSome(inner) => Self::from_value(*inner),
            ClarityValue::Tuple(fields) => Ok(Some(Self { fields })),
            other => Err(RecordError::NotATuple(other.type_name())),
        }
    }

    pub fn get(&self, field: &str) -> Option<&ClarityValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ClarityValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn require(&self, field: &str) -> Result<&ClarityValue, RecordError> {
        self.get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }

    fn unexpected(field: &str, expected: &'static str, actual: &ClarityValue) -> RecordError {
        RecordError::UnexpectedType {
            field: field.to_string(),
            expected,
            actual: actual.type_name(),
        }
    }

    pub fn uint(&self, field: &str) -> Result<u128, RecordError> {
        let v = self.require(field)?;
        v.as_u128()
            .ok_or_else(|| Self::unexpected(field, "uint", v))
    }

    pub fn uint_u64(&self, field: &str) -> Result<u64, RecordError> {
        let v = self.uint(field)?;
        u64::try_from(v).map_err(|_| RecordError::OutOfRange {
            field: field.to_string(),
            value: v,
        })
    }

    pub fn bool(&self, field: &str) -> Result<bool, RecordError> {
        let v = self.require(field)?;
        v.as_bool()
            .ok_or_else(|| Self::unexpected(field, "bool", v))
    }

    pub fn buffer(&self, field: &str) -> Result<&[u8], RecordError> {
        let v = self.require(field)?;
        v.as_buffer()
            .ok_or_else(|| Self::unexpected(field, "buffer", v))
    }

    /// A principal, or `(some principal)`.
    pub fn principal(&self, field: &str) -> Result<String, RecordError> {
        let v = self.require(field)?;
        v.as_principal_string()
            .ok_or_else(|| Self::unexpected(field, "principal", v))
    }

    /// `none` → `Ok(None)`; a principal or `(some principal)` → the address.
    pub fn optional_principal(&self, field: &str) -> Result<Option<String>, RecordError> {
        match self.require(field)? {
            ClarityValue::OptionalNone => Ok(None),
            v => v
                .as_principal_string()
                .map(Some)
                .ok_or_else(|| Self::unexpected(field, "optional principal", v)),
        }
    }

    pub fn contract(&self, field: &str) -> Result<&ContractPrincipal, RecordError> {
        match self.require(field)? {
            ClarityValue::ContractPrincipal(p) => Ok(p),
            v => Err(Self::unexpected(field, "contract-principal", v)),
        }
    }
}
