use thiserror::Error;

use crate::error::AppError;

/// Why a request could not be authenticated.
///
/// The variants exist for logging only; every one of them is reported to
/// the client as the same `401 Not authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no session token presented")]
    Missing,
    #[error("session token is malformed")]
    Malformed,
    #[error("session token signature mismatch")]
    SignatureMismatch,
    #[error("session token expired")]
    Expired,
}

impl AuthFailure {
    /// Stable label used in security log events.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::SignatureMismatch => "signature_mismatch",
            Self::Expired => "expired",
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(_: AuthFailure) -> Self {
        AppError::unauthorized()
    }
}
