use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Default validity window for session tokens (10 minutes).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);
/// Default name of the cookie carrying the session token.
pub const DEFAULT_COOKIE_NAME: &str = "currentUser";

/// Which signing backend produces and checks session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignerKind {
    /// Compact token assembled by hand over HMAC-SHA256.
    #[default]
    Hmac,
    /// Compact token produced by the `jsonwebtoken` crate.
    Jwt,
}

impl FromStr for SignerKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hmac" => Ok(Self::Hmac),
            "jwt" => Ok(Self::Jwt),
            other => Err(AppError::config(format!(
                "TOKEN_SIGNER must be 'hmac' or 'jwt', got '{other}'"
            ))),
        }
    }
}

/// Session token settings, loaded once at startup and immutable afterwards.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Secret key shared by the token issuer and verifier
    pub token_secret: Vec<u8>,
    /// Validity window of issued tokens
    pub token_ttl: Duration,
    /// Name of the cookie that carries the token
    pub cookie_name: String,
    /// Signing backend
    pub signer: SignerKind,
}

impl SecurityConfig {
    /// Create a SecurityConfig with the given secret and default settings
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            signer: SignerKind::default(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_signer(mut self, signer: SignerKind) -> Self {
        self.signer = signer;
        self
    }

    /// Load settings from the process environment.
    ///
    /// `API_SECRET` is required; `TOKEN_TTL_SECS`, `TOKEN_COOKIE_NAME` and
    /// `TOKEN_SIGNER` fall back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = env::var("API_SECRET")
            .map_err(|_| AppError::config("API_SECRET must be set"))?;
        if secret.is_empty() {
            return Err(AppError::config("API_SECRET must not be empty"));
        }

        let mut config = Self::new(secret.into_bytes());

        if let Ok(raw) = env::var("TOKEN_TTL_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!("TOKEN_TTL_SECS must be a number, got '{raw}'"))
            })?;
            if secs == 0 {
                return Err(AppError::config("TOKEN_TTL_SECS must be greater than zero"));
            }
            config.token_ttl = Duration::from_secs(secs);
        }

        if let Ok(name) = env::var("TOKEN_COOKIE_NAME") {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::config("TOKEN_COOKIE_NAME must not be empty"));
            }
            config.cookie_name = name.to_string();
        }

        if let Ok(kind) = env::var("TOKEN_SIGNER") {
            config.signer = kind.parse()?;
        }

        Ok(config)
    }

    /// Create a SecurityConfig with a fixed secret for tests
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec())
    }
}

// The secret must never reach logs.
impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_name", &self.cookie_name)
            .field("signer", &self.signer)
            .finish()
    }
}
