//! Identifier and opaque token generation

use rand::Rng;

/// Random bytes in an opaque token (hex-encoded to twice this length).
const TOKEN_BYTES: usize = 32;

/// Characters of a token kept when it is written to logs.
const PREVIEW_CHARS: usize = 8;

/// Collision-resistant record id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Unguessable bearer value for refresh, reset and verification tokens.
pub fn generate_opaque_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; TOKEN_BYTES] = rng.gen();
    hex::encode(random_bytes)
}

/// Shortened form safe to log (`abcd1234...`).
pub fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn opaque_tokens_are_long_and_distinct() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_opaque_token()).collect();
        assert_eq!(tokens.len(), 100);
        assert!(tokens.iter().all(|t| t.len() == TOKEN_BYTES * 2));
        assert!(tokens.iter().all(|t| t.chars().all(|c| c.is_ascii_hexdigit())));
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn preview_truncates() {
        assert_eq!(token_preview("0123456789abcdef"), "01234567...");
        assert_eq!(token_preview("abc"), "abc...");
    }
}
