pub mod asset;
pub mod btc;
pub mod clarity;
pub mod fees;
pub mod form;
pub mod record;
pub mod swap_type;

pub use asset::{AssetDescriptor, AssetError, ContractId};
pub use btc::{BtcNetwork, BtcScriptError, pubscript_to_btc_address};
pub use clarity::{ClarityError, ClarityValue, ContractPrincipal, StandardPrincipal};
pub use fees::{DEFAULT_FEE_ID, FeeContract, FeeRegistry};
pub use form::FormState;
pub use record::{RecordError, SwapRecord};
pub use swap_type::{CounterAsset, SwapType};
