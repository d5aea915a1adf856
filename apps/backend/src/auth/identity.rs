//! Public identity embedded in session tokens.

use serde::{Deserialize, Serialize};

/// Public profile of an authenticated user.
///
/// This is the only user data that ever leaves the credential store: no
/// password hash, no salt. The token service treats it as an opaque payload
/// and hands it back unchanged after verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
}
