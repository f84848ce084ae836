use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub env: Config,
}

impl AppState {
    pub fn new(store: Arc<Store>, env: Config) -> Self {
        Self { store, env }
    }
}
