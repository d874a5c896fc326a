pub mod container;
pub mod decoder;
pub mod error;
pub mod loader;

pub use container::{ContainerSnapshot, InvalidReason, SwapContainer, SwapParams, SwapView};
pub use decoder::decode_swap_record;
pub use error::{DecodeError, SwapLoadError};
pub use loader::load_swap;
