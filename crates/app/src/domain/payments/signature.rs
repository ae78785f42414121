//! Gateway request signing and callback verification.
//!
//! The gateway signs its parameters with a shared merchant secret: the
//! parameters are sorted by key, joined as a query string, suffixed with
//! `&key=<secret>` and hashed. Verification recomputes the digest and
//! compares; it must happen before any state change.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct GatewaySigner {
    secret: String,
}

impl GatewaySigner {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signature over the canonical parameter string.
    #[must_use]
    pub fn sign(&self, params: &[(&str, &str)]) -> String {
        let canonical = canonical_query(params);
        let digest = Sha256::digest(format!("{canonical}&key={}", self.secret));

        URL_SAFE_NO_PAD.encode(digest)
    }

    #[must_use]
    pub fn verify(&self, params: &[(&str, &str)], sign: &str) -> bool {
        self.sign(params) == sign
    }
}

/// Parameters sorted by key, joined as `k=v&k=v`, `sign` excluded.
fn canonical_query(params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(k, _)| *k != "sign").collect();
    sorted.sort_unstable();

    sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
