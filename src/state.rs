//! Shared application state for all routes: one long-lived store handle built at startup.

use crate::store::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: impl UserStore + 'static) -> Self {
        AppState {
            users: Arc::new(users),
        }
    }
}
