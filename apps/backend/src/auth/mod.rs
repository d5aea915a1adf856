pub mod claims;
pub mod credentials;
pub mod encoding;
pub mod errors;
pub mod identity;
pub mod jwt;
pub mod signer;
pub mod tokens;
pub mod transport;

#[cfg(test)]
mod tests_props;

pub use claims::SessionClaims;
pub use credentials::{CredentialError, CredentialStore, JsonUserStore, StoredUser};
pub use errors::AuthFailure;
pub use identity::UserIdentity;
pub use jwt::JwtSigner;
pub use signer::{HmacSigner, TokenSigner};
pub use tokens::SessionTokens;
