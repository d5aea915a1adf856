#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::credentials::{hash_password, CredentialStore, JsonUserStore};
pub use auth::identity::UserIdentity;
pub use auth::tokens::SessionTokens;
pub use error::AppError;
pub use extractors::auth_token::AuthToken;
pub use extractors::current_user::{Authenticated, CurrentUser};
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::token_gate::TokenGate;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::{SecurityConfig, SignerKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    howler_test_support::logging::init();
}
