use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::Store;

/// Shared application state, built once at startup and cloned into handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: JwtKeys,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            store,
            keys: JwtKeys::new(config.security.jwt_secret.as_bytes()),
        }
    }
}
