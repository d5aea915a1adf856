use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::credentials::{CredentialStore, JsonUserStore};
use crate::auth::tokens::SessionTokens;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Security configuration (secret, validity window, cookie name)
    pub security: SecurityConfig,
    /// Token issuer/verifier built from `security`
    pub tokens: SessionTokens,
    /// Username/password check used by the login endpoint
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(security: SecurityConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let tokens = SessionTokens::from_config(&security);
        Self {
            security,
            tokens,
            credentials,
        }
    }

    /// State with no known users; every login attempt fails.
    pub fn without_users(security: SecurityConfig) -> Self {
        Self::new(security, Arc::new(JsonUserStore::empty()))
    }

    /// Name of the cookie that carries the session token.
    pub fn cookie_name(&self) -> &str {
        &self.security.cookie_name
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::without_users(SecurityConfig::for_tests())
    }
}
