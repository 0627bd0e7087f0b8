use std::sync::Arc;

use crate::application::ports::ReviewApi;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ReviewApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn ReviewApi>) -> Self {
        Self { api }
    }
}
