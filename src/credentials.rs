//! Credential hashing and verification
//!
//! Passwords are hashed with argon2id at the crate's default parameters,
//! which act as the fixed work factor for every identity. The raw password
//! never leaves this module's call stack and the hash is never serialized
//! outward.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{Error, Result};

/// Hash a raw password with a fresh random salt
pub fn hash_password(raw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| Error::Internal {
            message: format!("Password hashing failed: {e}"),
        })?;
    Ok(hash.to_string())
}

/// Verify a raw password against a stored hash
///
/// An unparsable stored hash verifies as false rather than erroring, so a
/// corrupted record behaves like a wrong password at the call site.
pub fn verify_password(raw: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
    }
}
