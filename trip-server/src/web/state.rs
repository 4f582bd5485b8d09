//! Application state for the web layer.

use std::sync::Arc;

use crate::live::{CachedLiveProvider, TravelpayoutsClient};
use crate::planner::OptimizerConfig;
use crate::reference::InMemoryReference;

/// Live provider shared by all requests.
pub type SharedLiveProvider = CachedLiveProvider<TravelpayoutsClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cities, stored fares and hotels
    pub reference: Arc<InMemoryReference>,

    /// Cached live fare client
    pub live: Arc<SharedLiveProvider>,

    /// Configuration applied to every search
    pub config: Arc<OptimizerConfig>,
}

impl AppState {
    pub fn new(reference: InMemoryReference, live: SharedLiveProvider, config: OptimizerConfig) -> Self {
        Self {
            reference: Arc::new(reference),
            live: Arc::new(live),
            config: Arc::new(config),
        }
    }
}
