use corelib::{BtcScriptError, RecordError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported swap type {0:?}")]
    UnsupportedType(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("token decimals {0} out of range")]
    Decimals(u32),

    #[error("btc-receiver: {0}")]
    BtcReceiver(#[from] BtcScriptError),

    #[error("metadata lookup for {contract} failed: {cause:#}")]
    Lookup {
        contract: String,
        cause: anyhow::Error,
    },
}

#[derive(Error, Debug)]
pub enum SwapLoadError {
    #[error("no {swap_type} swap with id {id}")]
    NotFound { swap_type: String, id: u64 },

    #[error("failed to fetch swap entry: {0:#}")]
    Fetch(anyhow::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl SwapLoadError {
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, SwapLoadError::Decode(DecodeError::UnsupportedType(_)))
    }
}
