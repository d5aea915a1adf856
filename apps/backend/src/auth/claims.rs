//! Header and payload carried inside a session token.

use serde::{Deserialize, Serialize};

/// Algorithm identifier written into every token header.
pub const TOKEN_ALGORITHM: &str = "HS256";
/// Type tag written into every token header.
pub const TOKEN_TYPE: &str = "JWT";

/// Fixed token header. Field order is part of the encoded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Token payload: the identity plus its validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity, serialized by the issuer and returned untouched by the verifier
    pub user: serde_json::Value,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch); recorded but never checked
    #[serde(default)]
    pub iat: i64,
}
