//! Session token generation and keyed digests.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "bz";

/// Number of secret bytes encoded in a session token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

/// Application-wide secret used to key token and credential digests.
///
/// Wrapped so the secret material is zeroed on drop and never shows up in
/// debug output.
#[derive(Clone)]
pub struct AppSecret(Zeroizing<String>);

impl AppSecret {
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self(Zeroizing::new(secret))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(..)")
    }
}

/// Generate a fresh random bearer token.
#[must_use]
pub fn generate_session_token() -> String {
    let mut secret = [0u8; SESSION_TOKEN_SECRET_BYTES];
    OsRng.fill_bytes(&mut secret);

    format!("{SESSION_TOKEN_PREFIX}_{}", URL_SAFE_NO_PAD.encode(secret))
}

/// Digest stored in place of a session token.
#[must_use]
pub(crate) fn session_token_digest(secret: &AppSecret, token: &str) -> Vec<u8> {
    keyed_digest(secret, &["session", token])
}

/// Digest stored in place of a password.
#[must_use]
pub(crate) fn password_digest(secret: &AppSecret, username: &str, password: &str) -> Vec<u8> {
    keyed_digest(secret, &["password", username, password])
}

fn keyed_digest(secret: &AppSecret, parts: &[&str]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());

    for part in parts {
        // Length-prefix each part so concatenations cannot collide.
        hasher.update(u64::try_from(part.len()).unwrap_or(u64::MAX).to_be_bytes());
        hasher.update(part.as_bytes());
    }

    hasher.finalize().to_vec()
}
