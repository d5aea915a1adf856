//! Username/password check behind the login endpoint.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, Salt, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::identity::UserIdentity;
use crate::error::AppError;

const DECOY_PASSWORD: &str = "howler-decoy-password";
const DECOY_SALT: &[u8] = b"howler-decoy-salt";

/// Hash checked for unknown usernames so they cost the same as a wrong password.
static DECOY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password(DECOY_PASSWORD, DECOY_SALT).ok());

#[derive(Debug, Error)]
pub enum CredentialError {
    /// Unknown username or wrong password; callers cannot tell which.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::InvalidCredentials => AppError::invalid_credentials(),
            CredentialError::Hashing(detail) => AppError::internal(detail),
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Resolve a username/password pair to the user's public identity.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserIdentity, CredentialError>;
}

/// One record of the users file.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub identity: UserIdentity,
    /// argon2 PHC string
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredUser")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Read-only user table loaded from a JSON array.
#[derive(Debug, Default)]
pub struct JsonUserStore {
    users: HashMap<String, StoredUser>,
}

impl JsonUserStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_users(users: Vec<StoredUser>) -> Result<Self, AppError> {
        let mut by_name = HashMap::with_capacity(users.len());
        for user in users {
            let username = user.identity.username.clone();
            if by_name.insert(username.clone(), user).is_some() {
                return Err(AppError::config(format!(
                    "Duplicate username in users file: {username}"
                )));
            }
        }
        Ok(Self { users: by_name })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read users file {}: {e}", path.display()))
        })?;
        let users: Vec<StoredUser> = serde_json::from_str(&raw).map_err(|e| {
            AppError::config(format!("Failed to parse users file {}: {e}", path.display()))
        })?;

        let store = Self::from_users(users)?;
        debug!(path = %path.display(), users = store.len(), "Loaded users file");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for JsonUserStore {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserIdentity, CredentialError> {
        let stored = self.users.get(username).cloned();
        let password = password.to_owned();

        // argon2 is CPU bound; keep it off the executor threads
        tokio::task::spawn_blocking(move || match stored {
            Some(user) => {
                verify_password(&password, &user.password_hash)?;
                Ok(user.identity)
            }
            None => {
                if let Some(decoy) = DECOY_HASH.as_deref() {
                    let _ = verify_password(&password, decoy);
                }
                Err(CredentialError::InvalidCredentials)
            }
        })
        .await
        .map_err(|e| CredentialError::Hashing(format!("Password check task failed: {e}")))?
    }
}

/// Produce an argon2id PHC string for `password` with the given salt bytes.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<String, CredentialError> {
    let encoded = SaltString::encode_b64(salt)
        .map_err(|e| CredentialError::Hashing(format!("Invalid salt: {e}")))?;
    // encode_b64 skips the length check that hashing later panics on
    let salt = Salt::from_b64(encoded.as_str())
        .map_err(|e| CredentialError::Hashing(format!("Invalid salt: {e}")))?;

    Argon2::default()
        .hash_password(password.as_bytes(), salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hashing(e.to_string()))
}

fn verify_password(password: &str, phc: &str) -> Result<(), CredentialError> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| CredentialError::Hashing(format!("Unreadable password hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => Err(CredentialError::InvalidCredentials),
        Err(e) => Err(CredentialError::Hashing(e.to_string())),
    }
}
