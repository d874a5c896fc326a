use corelib::{FormState, SwapType};
use serde::Serialize;

/// What the view is asked to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapParams {
    pub swap_type: Option<SwapType>,
    pub id: Option<u64>,
    /// Pre-selected asset for a new swap.
    pub asset_trait: Option<String>,
    pub nft_id: Option<u128>,
}

impl SwapParams {
    pub fn existing(swap_type: impl Into<SwapType>, id: u64) -> Self {
        Self {
            swap_type: Some(swap_type.into()),
            id: Some(id),
            ..Self::default()
        }
    }

    /// Both halves of the lookup key, if present.
    pub fn key(&self) -> Option<SwapKey> {
        Some(SwapKey {
            swap_type: self.swap_type.clone()?,
            id: self.id?,
        })
    }
}

/// Identity of a decode request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapKey {
    pub swap_type: SwapType,
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    NotFound,
    UnsupportedType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SwapView {
    /// Nothing to load: new swap, or parameters incomplete.
    #[default]
    Idle,
    Loading,
    Ready,
    Invalid { reason: InvalidReason },
    Failed { message: String },
}

impl SwapView {
    pub fn is_loading(&self) -> bool {
        matches!(self, SwapView::Loading)
    }
}

pub const CREATE_TAB_LABEL: &str = "Create Swap";
pub const DETAILS_TAB_LABEL: &str = "Swap Details";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSnapshot {
    pub view: SwapView,
    pub form: FormState,
    pub block_height: Option<u64>,
    pub height_error: Option<String>,
    pub create_tab_label: &'static str,
    pub show_submit: bool,
    pub fee_options: Vec<&'static str>,
}
