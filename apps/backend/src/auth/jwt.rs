use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{crypto, decode, Algorithm, DecodingKey, EncodingKey, Validation};

use crate::auth::claims::{SessionClaims, TokenHeader};
use crate::auth::encoding::encode_json;
use crate::auth::errors::AuthFailure;
use crate::auth::signer::TokenSigner;
use crate::error::AppError;

/// Session tokens produced and checked by the `jsonwebtoken` crate.
///
/// Emits the same `HS256` compact form as [`HmacSigner`](crate::auth::signer::HmacSigner),
/// so the two backends verify each other's tokens.
#[derive(Clone)]
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &[u8]) -> Self {
        // Expiry is decided by SessionTokens (`now >= exp`), which is stricter
        // than the library's `exp < now` check. Only require the claim here.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, claims: &SessionClaims) -> Result<String, AppError> {
        // jsonwebtoken's Header serializes `typ` before `alg`; the header keeps `alg, typ` order.
        let header = encode_json(&TokenHeader::default())
            .map_err(|e| AppError::internal(format!("Failed to encode JWT header: {e}")))?;
        let payload = encode_json(claims)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT claims: {e}")))?;
        let message = format!("{header}.{payload}");

        let signature = crypto::sign(message.as_bytes(), &self.encoding, Algorithm::HS256)
            .map_err(|e| AppError::internal(format!("Failed to sign JWT: {e}")))?;
        Ok(format!("{message}.{signature}"))
    }

    fn open(&self, token: &str) -> Result<SessionClaims, AuthFailure> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthFailure::SignatureMismatch,
                _ => AuthFailure::Malformed,
            })
    }
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
