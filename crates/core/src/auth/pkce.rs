use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generates a PKCE code verifier.
///
/// 32 random bytes, base64url without padding (43 characters).
pub fn generate_verifier() -> String {
    let random_bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Computes the `S256` code challenge for a verifier.
///
/// `challenge = BASE64URL(SHA256(verifier))`
pub fn generate_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Generates the single-use CSRF `state` parameter: 16 random bytes, hex encoded.
pub fn generate_state() -> String {
    let random_bytes: [u8; 16] = rand::rng().random();
    hex::encode(random_bytes)
}
