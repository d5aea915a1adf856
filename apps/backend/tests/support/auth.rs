//! Users, passwords and tokens for integration tests

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use howler::auth::credentials::StoredUser;
use howler::infra::state::build_state;
use howler::state::app_state::AppState;
use howler::state::security_config::SecurityConfig;
use howler::{hash_password, JsonUserStore, SessionTokens, UserIdentity};
use once_cell::sync::Lazy;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";
pub const ALICE_PASSWORD: &str = "down-the-rabbit-hole";
pub const BOB_PASSWORD: &str = "correct horse battery staple";

const SALT: &[u8] = b"integration-salt";

// argon2 is slow; hash each fixture password once per test binary
static ALICE_HASH: Lazy<String> =
    Lazy::new(|| hash_password(ALICE_PASSWORD, SALT).expect("hash alice's password"));
static BOB_HASH: Lazy<String> =
    Lazy::new(|| hash_password(BOB_PASSWORD, SALT).expect("hash bob's password"));

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

pub fn alice() -> UserIdentity {
    UserIdentity {
        id: 1,
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
        username: "alice".to_string(),
        avatar: "https://robohash.org/alice".to_string(),
    }
}

pub fn bob() -> UserIdentity {
    UserIdentity {
        id: 2,
        first_name: "Bob".to_string(),
        last_name: "Builder".to_string(),
        username: "bob".to_string(),
        avatar: String::new(),
    }
}

pub fn fixture_store() -> JsonUserStore {
    JsonUserStore::from_users(vec![
        StoredUser {
            identity: alice(),
            password_hash: ALICE_HASH.clone(),
        },
        StoredUser {
            identity: bob(),
            password_hash: BOB_HASH.clone(),
        },
    ])
    .expect("fixture users are unique")
}

/// AppState with the fixture users and the given security settings
pub async fn build_test_state(security: SecurityConfig) -> AppState {
    build_state()
        .with_security(security)
        .with_credentials(Arc::new(fixture_store()))
        .build()
        .await
        .expect("state should build")
}

/// Mint a token for `identity` valid from now
pub fn mint_token(identity: &UserIdentity, security: &SecurityConfig) -> String {
    SessionTokens::from_config(security)
        .issue(identity)
        .expect("should mint token successfully")
}

/// Mint a token whose window closed an hour ago
pub fn mint_expired_token(identity: &UserIdentity, security: &SecurityConfig) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(3600))
        .expect("clock after 1970");
    SessionTokens::from_config(security)
        .issue_at(identity, past)
        .expect("should mint expired token successfully")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
