use std::sync::Arc;

use quarkhub_core::{config::Config, Store};

pub struct AppState {
    pub store: Store,
    pub config: Config,
}

pub type SharedState = Arc<AppState>;
