use std::sync::Arc;

use newsflow_shared::store::ContentStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
        }
    }
}
