//! Session token issuer and verifier.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde::de::DeserializeOwned;
use serde::Serialize;
use time::OffsetDateTime;

use crate::auth::claims::SessionClaims;
use crate::auth::errors::AuthFailure;
use crate::auth::jwt::JwtSigner;
use crate::auth::signer::{HmacSigner, TokenSigner};
use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, SignerKind};

/// Issues and verifies signed, expiring session tokens.
///
/// Cheap to clone; the signer and its key are shared and never mutated.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    signer: Arc<dyn TokenSigner>,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(signer: Arc<dyn TokenSigner>, ttl: Duration) -> Self {
        Self { signer, ttl }
    }

    /// Build the service described by `config`, picking its signing backend.
    pub fn from_config(config: &SecurityConfig) -> Self {
        let signer: Arc<dyn TokenSigner> = match config.signer {
            SignerKind::Hmac => Arc::new(HmacSigner::new(config.token_secret.clone())),
            SignerKind::Jwt => Arc::new(JwtSigner::new(&config.token_secret)),
        };
        Self::new(signer, config.token_ttl)
    }

    /// Validity window of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue<I: Serialize>(&self, identity: &I) -> Result<String, AppError> {
        self.issue_at(identity, SystemTime::now())
    }

    /// Mint a token for `identity` as if the current time were `now`.
    pub fn issue_at<I: Serialize>(&self, identity: &I, now: SystemTime) -> Result<String, AppError> {
        let user = serde_json::to_value(identity)
            .map_err(|e| AppError::internal(format!("Failed to serialize identity: {e}")))?;

        let iat = unix_seconds(now);
        let claims = SessionClaims {
            user,
            iat,
            exp: iat.saturating_add(ttl_seconds(self.ttl)),
        };

        self.signer.sign(&claims)
    }

    pub fn verify<I: DeserializeOwned>(&self, token: &str) -> Result<I, AuthFailure> {
        self.verify_at(token, SystemTime::now())
    }

    /// Recover the identity from `token` as if the current time were `now`.
    ///
    /// A token is rejected once `now >= exp`. `iat` is not compared with
    /// `now`, so a token stamped in the future is accepted until it expires.
    pub fn verify_at<I: DeserializeOwned>(
        &self,
        token: &str,
        now: SystemTime,
    ) -> Result<I, AuthFailure> {
        let claims = self.signer.open(token)?;

        if unix_seconds(now) >= claims.exp {
            return Err(AuthFailure::Expired);
        }

        serde_json::from_value(claims.user).map_err(|_| AuthFailure::Malformed)
    }
}

/// Whole seconds since the Unix epoch; negative before it.
pub(crate) fn unix_seconds(at: SystemTime) -> i64 {
    OffsetDateTime::from(at).unix_timestamp()
}

fn ttl_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}
