//! Password hashing boundary. The primitive itself is bcrypt; nothing else
//! in the crate touches credential bytes directly.

/// Hash a plain-text password for storage
pub fn hash_password(password: &str, cost: u32) -> Result<String, String> {
    bcrypt::hash(password, cost).map_err(|e| format!("Password hashing failed: {}", e))
}

/// Verify a plain-text password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    bcrypt::verify(password, hash).map_err(|e| format!("Password verification failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost, to keep the suite fast
    const COST: u32 = 4;

    #[test]
    fn hash_verifies_against_original_password() {
        let hash = hash_password("password123", COST).unwrap();
        assert!(verify_password("password123", &hash).unwrap());
        assert!(!verify_password("password124", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("password123", COST).unwrap();
        let b = hash_password("password123", COST).unwrap();
        assert_ne!(a, b);
    }
}
