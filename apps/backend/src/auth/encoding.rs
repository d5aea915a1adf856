//! Canonical token segment encoding: JSON, then base64url without padding.
//!
//! Decoding is strict: padding and non-zero trailing bits are rejected, so
//! every segment has exactly one accepted spelling.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::errors::AuthFailure;

/// Separator between the header, payload and signature segments.
pub const SEGMENT_SEPARATOR: char = '.';

pub fn encode_bytes(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_vec(value).map(|json| encode_bytes(&json))
}

pub fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T, AuthFailure> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthFailure::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthFailure::Malformed)
}

/// Split a token into exactly three segments.
pub fn split_segments(token: &str) -> Result<(&str, &str, &str), AuthFailure> {
    let mut parts = token.split(SEGMENT_SEPARATOR);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(AuthFailure::Malformed),
    }
}
