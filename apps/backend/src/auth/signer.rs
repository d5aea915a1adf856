//! Signing backends for session tokens.
//!
//! A [`TokenSigner`] turns claims into token text and back. It owns the
//! header, the encoding and the MAC; the validity window and the expiry
//! decision belong to [`SessionTokens`](crate::auth::tokens::SessionTokens),
//! so every backend shares one expiry rule.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::auth::claims::{SessionClaims, TokenHeader};
use crate::auth::encoding::{decode_json, encode_bytes, encode_json, split_segments};
use crate::auth::errors::AuthFailure;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub trait TokenSigner: Send + Sync + fmt::Debug {
    /// Produce `header.payload.signature` for the given claims.
    fn sign(&self, claims: &SessionClaims) -> Result<String, AppError>;

    /// Check structure and signature and return the claims. Expiry is not
    /// checked here.
    fn open(&self, token: &str) -> Result<SessionClaims, AuthFailure>;
}

/// Compact token assembled directly over HMAC-SHA256.
#[derive(Clone)]
pub struct HmacSigner {
    secret: Vec<u8>,
}

impl HmacSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// base64url(HMAC-SHA256(secret, message)).
    fn signature(&self, message: &str) -> Option<String> {
        // HMAC accepts keys of any length, so this only fails on a broken build.
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(message.as_bytes());
        Some(encode_bytes(&mac.finalize().into_bytes()))
    }
}

impl TokenSigner for HmacSigner {
    fn sign(&self, claims: &SessionClaims) -> Result<String, AppError> {
        let header = encode_json(&TokenHeader::default())
            .map_err(|e| AppError::internal(format!("Failed to encode token header: {e}")))?;
        let payload = encode_json(claims)
            .map_err(|e| AppError::internal(format!("Failed to encode token payload: {e}")))?;

        let message = format!("{header}.{payload}");
        let signature = self
            .signature(&message)
            .ok_or_else(|| AppError::internal("Failed to initialise HMAC"))?;

        Ok(format!("{message}.{signature}"))
    }

    fn open(&self, token: &str) -> Result<SessionClaims, AuthFailure> {
        let (header, payload, signature) = split_segments(token)?;
        let claims: SessionClaims = decode_json(payload)?;

        let expected = self
            .signature(&format!("{header}.{payload}"))
            .ok_or(AuthFailure::SignatureMismatch)?;

        // Slices of different length compare unequal.
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return Err(AuthFailure::SignatureMismatch);
        }

        Ok(claims)
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}
