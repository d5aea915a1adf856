use tracing::{info, warn};

use crate::auth::errors::AuthFailure;
use crate::logging::pii::Masked;
use crate::trace_ctx;

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, username: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %Masked(username.unwrap_or("")),
        reason,
        "Authentication failure"
    );
}

/// Log a request turned away by the token gate.
pub fn auth_rejected(failure: &AuthFailure, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason = failure.reason(),
        path,
        "Session token rejected"
    );
}

/// Log a freshly issued session.
pub fn session_issued(username: &str, ttl_secs: u64) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_SESSION_ISSUED",
        %trace_id,
        username = %Masked(username),
        ttl_secs,
        "Session token issued"
    );
}

/// Log a logout (cookie cleared).
pub fn logout(had_token: bool) {
    let trace_id = trace_ctx::trace_id();

    info!(event = "SECURITY_LOGOUT", %trace_id, had_token, "Session cookie cleared");
}
