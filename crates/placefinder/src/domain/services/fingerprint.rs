//! Content fingerprints for drift detection between local and remote prompts

use sha2::{Digest, Sha256};

/// Number of hex characters used when a fingerprint is shown to humans
pub const SHORT_FINGERPRINT_LEN: usize = 12;

/// SHA-256 of the whitespace-trimmed text, hex encoded.
pub fn content_fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.trim().as_bytes()))
}

/// Leading characters of a fingerprint, for version descriptions and logs
pub fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint
        .get(..SHORT_FINGERPRINT_LEN)
        .unwrap_or(fingerprint)
}
