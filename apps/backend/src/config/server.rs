//! Listener and data-file settings for the binary.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_USERS_FILE: &str = "data/users.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON array of users with argon2 password hashes
    pub users_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
        }
    }
}

impl ServerConfig {
    /// Read `BACKEND_HOST`, `BACKEND_PORT` and `USERS_FILE`, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(host) = env::var("BACKEND_HOST") {
            config.host = host;
        }

        if let Ok(raw) = env::var("BACKEND_PORT") {
            config.port = raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?;
        }

        if let Ok(path) = env::var("USERS_FILE") {
            config.users_file = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
