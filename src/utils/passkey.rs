//! Passkey hashing and verification.
//!
//! Passkeys are hashed with Argon2id (memory-hard, salted) and stored as PHC
//! strings, so the parameters travel with each hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::application::errors::LinkError;

/// Hashes a plaintext passkey with a fresh random salt.
///
/// # Errors
///
/// Returns [`LinkError::Passkey`] if hashing fails.
pub fn hash_passkey(passkey: &str) -> Result<String, LinkError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(passkey.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LinkError::Passkey(e.to_string()))
}

/// Checks a plaintext passkey against a stored hash.
///
/// # Errors
///
/// Returns [`LinkError::Passkey`] if the stored hash is not a valid PHC string.
pub fn verify_passkey(passkey: &str, hash: &str) -> Result<bool, LinkError> {
    let parsed = PasswordHash::new(hash).map_err(|e| LinkError::Passkey(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(passkey.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_passkey("open-sesame").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_passkey("open-sesame", &hash).unwrap());
        assert!(!verify_passkey("open-sesame!", &hash).unwrap());
    }

    #[test]
    fn test_same_passkey_gets_different_salts() {
        let a = hash_passkey("secret").unwrap();
        let b = hash_passkey("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_passkey("secret", "not-a-hash"),
            Err(LinkError::Passkey(_))
        ));
    }
}
