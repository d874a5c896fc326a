//! Mutable view state behind the container's lock.
//!
//! Every `begin` that changes the key bumps the generation; a decode result
//! is only applied if it carries the generation and key that are current
//! when it lands.

use corelib::{FormState, fees::fee_options};

use super::types::{
    CREATE_TAB_LABEL, ContainerSnapshot, DETAILS_TAB_LABEL, InvalidReason, SwapKey, SwapParams,
    SwapView,
};
use crate::error::SwapLoadError;

#[derive(Debug, Default)]
pub struct ContainerState {
    params: SwapParams,
    generation: u64,
    view: SwapView,
    form: FormState,
    pub block_height: Option<u64>,
    pub height_error: Option<String>,
}

impl ContainerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install new parameters. Returns the load to start, if any.
    ///
    /// A load starts only when the `(type, id)` key changes. With the key
    /// unchanged, only the remaining params are updated and whatever is
    /// loaded or in flight stays.
    pub fn begin(
        &mut self,
        params: SwapParams,
        default_recipient: Option<String>,
    ) -> Option<(SwapKey, u64)> {
        let key = params.key();
        if key.is_some() && key == self.params.key() && self.view != SwapView::Idle {
            self.params.asset_trait = params.asset_trait;
            self.params.nft_id = params.nft_id;
            return None;
        }

        self.generation += 1;
        self.form = FormState::for_new_swap(
            params.asset_trait.clone(),
            params.nft_id,
            default_recipient,
        );

        self.params = params;
        self.view = if key.is_some() {
            SwapView::Loading
        } else {
            SwapView::Idle
        };

        key.map(|k| (k, self.generation))
    }

    /// Apply a finished load. Returns `false` when the result is stale.
    pub fn apply(
        &mut self,
        key: &SwapKey,
        generation: u64,
        result: Result<FormState, SwapLoadError>,
    ) -> bool {
        if generation != self.generation || self.params.key().as_ref() != Some(key) {
            return false;
        }

        match result {
            Ok(mut form) => {
                if form.asset_recipient.is_none() {
                    form.asset_recipient = self.form.asset_recipient.take();
                }
                self.form = form;
                self.view = SwapView::Ready;
            }
            Err(SwapLoadError::NotFound { .. }) => {
                self.view = SwapView::Invalid {
                    reason: InvalidReason::NotFound,
                };
            }
            Err(e) if e.is_unsupported_type() => {
                self.view = SwapView::Invalid {
                    reason: InvalidReason::UnsupportedType,
                };
            }
            Err(e) => {
                self.view = SwapView::Failed {
                    message: format!("{e:#}"),
                };
            }
        }
        true
    }

    pub fn snapshot(&self) -> ContainerSnapshot {
        let has_id = self.params.id.is_some();
        let atomic = self
            .params
            .swap_type
            .as_ref()
            .is_some_and(|t| t.is_atomic());

        ContainerSnapshot {
            view: self.view.clone(),
            form: self.form.clone(),
            block_height: self.block_height,
            height_error: self.height_error.clone(),
            create_tab_label: if self.form.is_done() || has_id {
                DETAILS_TAB_LABEL
            } else {
                CREATE_TAB_LABEL
            },
            show_submit: has_id && !atomic,
            fee_options: self
                .params
                .swap_type
                .as_ref()
                .map(fee_options)
                .unwrap_or_default(),
        }
    }
}
