//! Salted password hashing.
//!
//! Each user gets a random salt; the stored hash is
//! `hex(sha256(salt || password))`.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh random salt for a new user.
pub fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Hash a password with the given salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a password attempt against the stored salt and hash.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);
        assert!(verify_password("hunter2", &salt, &hash));
        assert!(!verify_password("hunter3", &salt, &hash));
    }

    #[test]
    fn test_same_password_different_salts_differ() {
        let hash1 = hash_password("hunter2", &generate_salt());
        let hash2 = hash_password("hunter2", &generate_salt());
        assert_ne!(hash1, hash2);
    }
}
