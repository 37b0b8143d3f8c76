//! Short key generation and validation utilities.
//!
//! Generated keys are drawn from the OS random source and encoded with a
//! 64-symbol URL-safe alphabet. Custom keys supplied by callers are checked
//! against length, charset and a reserved word list.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::application::errors::LinkError;

/// URL-safe alphabet used for generated keys. 64 symbols, so a random byte
/// masked to 6 bits maps onto it without bias.
pub const KEY_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of generated keys.
pub const KEY_LENGTH: usize = 6;

/// Key returned when the OS random source is unavailable.
pub const FALLBACK_KEY: &str = "fallbk";

/// Length bounds for custom keys (inclusive).
pub const CUSTOM_KEY_MIN_LENGTH: usize = 3;
pub const CUSTOM_KEY_MAX_LENGTH: usize = 20;

/// Words that cannot be used as custom keys, compared case-insensitively.
///
/// These collide with routes or are likely to in the future.
pub const RESERVED_KEYS: &[&str] = &[
    "api", "admin", "www", "app", "help", "about", "contact", "terms", "privacy",
];

/// Top-level paths served by the router ahead of `/{key}`.
pub const ROUTED_PATHS: &[&str] = &["health"];

static CUSTOM_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("custom key pattern is valid"));

/// Generates a random 6-character short key.
///
/// No uniqueness is guaranteed; callers check the store and retry.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key();
/// assert_eq!(key.len(), 6);
/// ```
pub fn generate_key() -> String {
    generate_key_with_length(KEY_LENGTH)
}

/// Generates a random key of `length` characters from [`KEY_ALPHABET`].
///
/// If the OS random source fails the fixed [`FALLBACK_KEY`] is returned
/// instead. Collisions on that value are caught by the caller's uniqueness
/// check like any other.
pub fn generate_key_with_length(length: usize) -> String {
    let mut buffer = vec![0u8; length];

    if let Err(e) = getrandom::fill(&mut buffer) {
        warn!(error = %e, "OS random source failed, using fallback short key");
        return FALLBACK_KEY.to_string();
    }

    encode_key(&buffer)
}

fn encode_key(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| KEY_ALPHABET[usize::from(b & 0x3f)] as char)
        .collect()
}

/// Validates a user-provided custom key.
///
/// An empty key is valid and means "generate one for me".
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Not a reserved word or a routed path such as `health` (case-insensitive)
///
/// # Errors
///
/// Returns [`LinkError::InvalidKey`] if any rule is violated.
pub fn validate_custom_key(key: &str) -> Result<(), LinkError> {
    if key.is_empty() {
        return Ok(());
    }

    if key.len() < CUSTOM_KEY_MIN_LENGTH || key.len() > CUSTOM_KEY_MAX_LENGTH {
        return Err(LinkError::InvalidKey(format!(
            "custom key must be between {CUSTOM_KEY_MIN_LENGTH} and {CUSTOM_KEY_MAX_LENGTH} characters"
        )));
    }

    if !CUSTOM_KEY_REGEX.is_match(key) {
        return Err(LinkError::InvalidKey(
            "custom key can only contain letters, numbers, hyphens, and underscores".to_string(),
        ));
    }

    if RESERVED_KEYS
        .iter()
        .chain(ROUTED_PATHS)
        .any(|reserved| reserved.eq_ignore_ascii_case(key))
    {
        return Err(LinkError::InvalidKey(format!(
            "'{key}' is a reserved word and cannot be used as custom key"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_key_has_correct_length() {
        assert_eq!(generate_key().len(), KEY_LENGTH);
    }

    #[test]
    fn test_generate_key_uses_alphabet() {
        for _ in 0..200 {
            let key = generate_key();
            assert!(key.bytes().all(|b| KEY_ALPHABET.contains(&b)), "{key}");
        }
    }

    #[test]
    fn test_generate_key_produces_unique_keys() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_key()).collect();

        // 64^6 possible keys; a duplicate among 1000 happens with p < 1e-5.
        assert!(keys.len() >= 999);
    }

    #[test]
    fn test_generate_key_with_length() {
        assert_eq!(generate_key_with_length(8).len(), 8);
        assert_eq!(generate_key_with_length(0), "");
    }

    #[test]
    fn test_encode_key_masks_high_bits() {
        assert_eq!(encode_key(&[0, 63, 64, 255]), "A-A-");
        assert_eq!(encode_key(&[26, 52]), "a0");
    }

    #[test]
    fn test_validate_empty_key_means_generate() {
        assert!(validate_custom_key("").is_ok());
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_key("abc").is_ok());
        assert!(validate_custom_key("ab").is_err());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_key(&"a".repeat(20)).is_ok());

        let err = validate_custom_key(&"a".repeat(21)).unwrap_err();
        assert!(matches!(err, LinkError::InvalidKey(_)));
        assert!(err.to_string().contains("between 3 and 20"));
    }

    #[test]
    fn test_validate_mixed_valid_chars() {
        assert!(validate_custom_key("My_Link-2024").is_ok());
        assert!(validate_custom_key("___").is_ok());
        assert!(validate_custom_key("--x").is_ok());
    }

    #[test]
    fn test_validate_special_characters() {
        for key in ["my code", "my.link", "link@home", "ключ", "a/b/c", "percent%20"] {
            let err = validate_custom_key(key).unwrap_err();
            assert!(matches!(err, LinkError::InvalidKey(_)), "{key}");
        }
    }

    #[test]
    fn test_validate_all_reserved_keys() {
        for &reserved in RESERVED_KEYS {
            assert!(validate_custom_key(reserved).is_err(), "{reserved}");
            assert!(
                validate_custom_key(&reserved.to_uppercase()).is_err(),
                "{reserved}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_routed_paths() {
        for key in ["health", "Health", "HEALTH"] {
            assert!(
                matches!(validate_custom_key(key), Err(LinkError::InvalidKey(_))),
                "{key}"
            );
        }
        assert!(validate_custom_key("healthy").is_ok());
    }

    #[test]
    fn test_validate_reserved_word_as_prefix_is_allowed() {
        assert!(validate_custom_key("api2").is_ok());
        assert!(validate_custom_key("about-us").is_ok());
    }
}
