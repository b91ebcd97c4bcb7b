//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Lower bound on random bytes per session token.
pub const MIN_TOKEN_BYTES: usize = 15;

/// Upper bound on session lifetime in days.
pub const MAX_TTL_DAYS: i64 = 365;

/// Session issuance and cookie transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in days. Sessions are never extended on use.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
    /// Number of random bytes in each token before encoding.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// Name of the cookie carrying the token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            token_bytes: default_token_bytes(),
            cookie_name: default_cookie_name(),
            cookie_secure: true,
        }
    }
}

fn default_ttl_days() -> i64 {
    7
}

fn default_token_bytes() -> usize {
    20
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_true() -> bool {
    true
}
