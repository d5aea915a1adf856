//! Property tests for session tokens (pure, no HTTP).

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use proptest::prelude::*;

use crate::auth::errors::AuthFailure;
use crate::auth::identity::UserIdentity;
use crate::auth::signer::HmacSigner;
use crate::auth::tokens::SessionTokens;

const SECRET: &str = "prop_test_secret";

fn tokens(ttl_secs: u64) -> SessionTokens {
    SessionTokens::new(
        Arc::new(HmacSigner::new(SECRET)),
        Duration::from_secs(ttl_secs),
    )
}

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn identity_strategy() -> impl Strategy<Value = UserIdentity> {
    (
        any::<u64>(),
        "\\PC{0,12}",
        "\\PC{0,12}",
        "[a-z][a-z0-9_]{0,15}",
        "(https://robohash\\.org/[a-z]{1,8})?",
    )
        .prop_map(|(id, first_name, last_name, username, avatar)| UserIdentity {
            id,
            first_name,
            last_name,
            username,
            avatar,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: whatever identity goes in comes back unchanged while the
    /// token is still inside its window.
    #[test]
    fn prop_identity_round_trips(
        user in identity_strategy(),
        issued in 0u64..4_000_000_000,
        ttl in 1u64..100_000,
    ) {
        let tokens = tokens(ttl);
        let token = tokens.issue_at(&user, at(issued)).unwrap();
        let back: UserIdentity = tokens.verify_at(&token, at(issued)).unwrap();
        prop_assert_eq!(back, user);
    }

    /// Property: a token is valid strictly before `iat + ttl` and expired
    /// from that instant on.
    #[test]
    fn prop_expiry_boundary(
        issued in 0u64..4_000_000_000,
        ttl in 1u64..100_000,
        elapsed in 0u64..200_000,
    ) {
        let tokens = tokens(ttl);
        let token = tokens.issue_at(&serde_json::json!({"id": 1}), at(issued)).unwrap();
        let result = tokens.verify_at::<serde_json::Value>(&token, at(issued + elapsed));

        if elapsed < ttl {
            prop_assert!(result.is_ok(), "elapsed {elapsed} < ttl {ttl} must verify");
        } else {
            prop_assert_eq!(result.unwrap_err(), AuthFailure::Expired);
        }
    }

    /// Property: changing any single character of a token makes it fail
    /// verification.
    #[test]
    fn prop_single_char_tamper_is_rejected(
        user in identity_strategy(),
        index in any::<prop::sample::Index>(),
    ) {
        let tokens = tokens(600);
        let now = SystemTime::now();
        let token = tokens.issue_at(&user, now).unwrap();

        let positions: Vec<usize> = token
            .char_indices()
            .filter(|(_, c)| *c != '.')
            .map(|(i, _)| i)
            .collect();
        let pos = positions[index.index(positions.len())];

        let current = &token[pos..pos + 1];
        let replacement = if current == "A" { "B" } else { "A" };
        let mut tampered = token.clone();
        tampered.replace_range(pos..pos + 1, replacement);

        prop_assert!(
            tokens.verify_at::<UserIdentity>(&tampered, now).is_err(),
            "tampering at byte {pos} went unnoticed"
        );
    }

    /// Property: a token only verifies under the key that signed it.
    #[test]
    fn prop_other_key_is_rejected(
        user in identity_strategy(),
        other in "[a-zA-Z0-9]{1,32}",
    ) {
        prop_assume!(other != SECRET);
        let signer = tokens(600);
        let verifier = SessionTokens::new(
            Arc::new(HmacSigner::new(other.as_str())),
            Duration::from_secs(600),
        );

        let token = signer.issue(&user).unwrap();
        prop_assert_eq!(
            verifier.verify::<UserIdentity>(&token).unwrap_err(),
            AuthFailure::SignatureMismatch
        );
    }
}
