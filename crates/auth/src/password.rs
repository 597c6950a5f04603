//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in PHC string format (`$argon2id$v=19$...`), so the
//! parameters travel with the hash and verification stays correct across
//! parameter upgrades.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns an error if the underlying hasher fails.
pub fn hash_password(password: &SecretString) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC-format hash.
///
/// Comparison inside the verifier is constant-time.
///
/// # Errors
///
/// Returns `InvalidHashFormat` for malformed stored hashes and
/// `VerificationFailed` on mismatch.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(expected_hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("CorrectHorse1!".to_string());
        let hash = hash_password(&password).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&password, &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectPassword".to_string());
        let wrong = SecretString::from("WrongPassword".to_string());
        let hash = hash_password(&password).unwrap();
        assert!(matches!(
            verify_password(&wrong, &hash),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_round_trip_at_length_bounds() {
        // The API accepts passwords of 8 to 128 characters.
        for len in [8usize, 128] {
            let raw = "p".repeat(len);
            let password = SecretString::from(raw);
            let hash = hash_password(&password).unwrap();
            assert!(verify_password(&password, &hash).is_ok());
        }
    }

    #[test]
    fn test_salts_are_unique() {
        let password = SecretString::from("SamePassword88".to_string());
        let h1 = hash_password(&password).unwrap();
        let h2 = hash_password(&password).unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password(&password, &h1).is_ok());
        assert!(verify_password(&password, &h2).is_ok());
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let password = SecretString::from("whatever123".to_string());
        assert!(matches!(
            verify_password(&password, "not-a-phc-string"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }
}
