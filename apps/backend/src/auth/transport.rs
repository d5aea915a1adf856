//! Carries session tokens between client and server.
//!
//! Browsers send the token back in a cookie; other clients use
//! `Authorization: Bearer <token>`. The cookie wins when both are present.

use std::time::Duration;

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::Cookie;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponseBuilder};

const BEARER_PREFIX: &str = "Bearer ";

/// Max-Age sent when clearing the cookie, already in the past.
pub const CLEARED_MAX_AGE_SECS: i64 = -360;

/// Find the candidate token on an inbound request.
///
/// An empty cookie (what logout leaves behind) counts as absent.
pub fn extract_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    bearer_token(req.headers().get(header::AUTHORIZATION))
}

/// Token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: Option<&HeaderValue>) -> Option<String> {
    let raw = value?.to_str().ok()?;
    let token = raw.strip_prefix(BEARER_PREFIX)?.split(' ').next()?;

    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

pub fn token_cookie(cookie_name: &str, token: &str, ttl: Duration) -> Cookie<'static> {
    let max_age = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

    Cookie::build(cookie_name.to_string(), token.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .max_age(CookieDuration::seconds(max_age))
        .finish()
}

/// Replacement cookie that makes the client drop the token immediately.
pub fn cleared_cookie(cookie_name: &str) -> Cookie<'static> {
    Cookie::build(cookie_name.to_string(), String::new())
        .path("/")
        .http_only(true)
        .secure(true)
        .max_age(CookieDuration::seconds(CLEARED_MAX_AGE_SECS))
        .finish()
}

pub fn attach_token(res: &mut HttpResponseBuilder, cookie_name: &str, token: &str, ttl: Duration) {
    res.cookie(token_cookie(cookie_name, token, ttl));
}

pub fn clear_token(res: &mut HttpResponseBuilder, cookie_name: &str) {
    res.cookie(cleared_cookie(cookie_name));
}
