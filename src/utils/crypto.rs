// Cryptographic utilities for generating secure tokens

use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;

/// Entropy of an issued authentication token (128 bits)
pub const AUTHENTICATION_TOKEN_BYTES: usize = 16;

/// Entropy of an OAuth state parameter (192 bits)
pub const STATE_TOKEN_BYTES: usize = 24;

/// Generate an opaque authentication token
///
/// 16 bytes from the thread-local CSPRNG, hex encoded to 32 lowercase
/// characters. Safe to call from concurrent requests.
#[must_use]
pub fn generate_authentication_token() -> String {
    let mut token = [0u8; AUTHENTICATION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut token);
    hex::encode(token)
}

/// Generate a cryptographically secure CSRF state for the OAuth request phase
///
/// `Base64URL` without padding, so it can be placed in a query string as-is.
#[must_use]
pub fn generate_state_token() -> String {
    let mut nonce = [0u8; STATE_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut nonce);
    general_purpose::URL_SAFE_NO_PAD.encode(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_authentication_token_format() {
        let token = generate_authentication_token();
        assert_eq!(token.len(), 32);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_authentication_tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_authentication_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_state_token_is_url_safe() {
        let state = generate_state_token();
        // 24 bytes -> 32 base64 characters without padding
        assert_eq!(state.len(), 32);
        assert!(state
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(state, generate_state_token());
    }
}
