//! Headless swap view model.
//!
//! Owns the form state shown for one swap, loads it when the parameters
//! identify an existing swap, and fetches the chain height once on mount.

pub mod state;
pub mod types;

use std::sync::Arc;

use adapters::stacks::{StacksApi, TokenMetadata};
use corelib::BtcNetwork;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, instrument, warn};

use crate::loader::load_swap;
use state::ContainerState;
pub use types::{ContainerSnapshot, InvalidReason, SwapKey, SwapParams, SwapView};

pub struct SwapContainer<A> {
    api: Arc<A>,
    /// Address of the current user, if connected.
    owner: Option<String>,
    network: BtcNetwork,
    state: Mutex<ContainerState>,
}

impl<A> SwapContainer<A>
where
    A: StacksApi + TokenMetadata + 'static,
{
    pub fn new(api: Arc<A>, owner: Option<String>, network: BtcNetwork) -> Arc<Self> {
        Arc::new(Self {
            api,
            owner,
            network,
            state: Mutex::new(ContainerState::new()),
        })
    }

    /// Start the one-off chain height fetch.
    pub fn mount(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);

        let fetch = async move {
            let result = this.api.block_height().await;
            let mut st = this.state.lock().await;

            match result {
                Ok(height) => {
                    debug!(height, "block height fetched");
                    st.block_height = Some(height);
                }
                Err(e) => {
                    warn!(error = ?e, "failed to fetch block height");
                    st.height_error = Some(format!("{e:#}"));
                }
            }
        };

        tokio::spawn(fetch.in_current_span())
    }

    /// Replace the view parameters.
    ///
    /// When the `(type, id)` key changes to one naming an existing swap, a
    /// decode task is spawned and its handle returned. Same key: no task,
    /// the loaded swap is kept. Results for superseded keys are dropped
    /// when they land.
    #[instrument(skip(self, params), fields(swap_type = ?params.swap_type, id = ?params.id))]
    pub async fn set_params(self: &Arc<Self>, params: SwapParams) -> Option<JoinHandle<()>> {
        let default_recipient = params
            .swap_type
            .as_ref()
            .filter(|t| t.is_atomic())
            .and(self.owner.clone());

        let (key, generation) = self.state.lock().await.begin(params, default_recipient)?;
        let this = Arc::clone(self);

        let load = async move {
            let result = load_swap(this.api.as_ref(), &key.swap_type, key.id, this.network).await;

            if let Err(e) = &result {
                info!(swap_type = %key.swap_type, id = key.id, error = %e, "swap not loaded");
            }

            if !this.state.lock().await.apply(&key, generation, result) {
                debug!(swap_type = %key.swap_type, id = key.id, generation, "stale swap result discarded");
            }
        };

        Some(tokio::spawn(load.in_current_span()))
    }

    pub async fn snapshot(&self) -> ContainerSnapshot {
        self.state.lock().await.snapshot()
    }
}
