use crate::error::DomainError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Derives a salted bcrypt digest of `password`.
///
/// A fresh salt is generated per call, so hashing the same password twice
/// yields different outputs.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash in constant time.
///
/// Never fails for a wrong password, and a malformed stored hash (corrupted
/// data) is reported as a non-match rather than an error.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_hashing_is_salted() {
        let password = "test_password123";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();

        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn test_verify_with_malformed_hash() {
        // Corrupted stored data is a non-match, not a crash.
        assert!(!verify_password("test_password123", "invalidhashformat"));
        assert!(!verify_password("test_password123", ""));
    }
}
