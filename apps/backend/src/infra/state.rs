use std::sync::Arc;

use crate::auth::credentials::{CredentialStore, JsonUserStore};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: None,
            credentials: None,
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Fails with a config error when no `SecurityConfig` was supplied.
    pub async fn build(self) -> Result<AppState, AppError> {
        let security_config = self
            .security_config
            .ok_or_else(|| AppError::config("SecurityConfig must be supplied to build state"))?;
        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(JsonUserStore::empty()));
        Ok(AppState::new(security_config, credentials))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
