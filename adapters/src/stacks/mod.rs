pub mod api;
pub mod client;
pub mod errors;
pub mod nft;
pub mod types;

pub use api::{FtData, NftData, StacksApi, TokenMetadata};
pub use client::{ClientConfig, StacksClient};
pub use errors::StacksError;
