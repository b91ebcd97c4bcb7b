//! Opaque session token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Upper bound on accepted token length; anything longer is malformed.
pub const MAX_TOKEN_LEN: usize = 256;

/// Generate a URL-safe token from `bytes` random bytes of the thread-local CSPRNG.
pub fn generate_token(bytes: usize) -> String {
    let raw: Vec<u8> = std::iter::repeat_with(rand::random::<u8>)
        .take(bytes)
        .collect();
    URL_SAFE_NO_PAD.encode(raw)
}

/// Whether `token` could have been produced by [`generate_token`].
pub fn is_well_formed(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
