use corelib::{ClarityError, RecordError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StacksError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("node rejected the call: {cause}")]
    Api { cause: String },

    #[error("clarity value error: {0}")]
    Clarity(#[from] ClarityError),

    #[error("malformed swap entry: {0}")]
    Record(#[from] RecordError),

    #[error("invalid response from stacks node: {0}")]
    InvalidResponse(String),
}
