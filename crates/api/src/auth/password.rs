//! PBKDF2-HMAC-SHA256 password hashing, verification, and input checks.
//!
//! Hashes are stored as two hex strings: a 16-byte random salt and the
//! 32-byte derived key. The salt is hex-decoded before derivation, so stored
//! `(password_salt, password_hash)` pairs stay interchangeable with existing
//! records.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use workaround_core::error::AuthError;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Random salt length in bytes (32 hex characters).
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes: the SHA-256 digest size (64 hex characters).
pub const HASH_LEN: usize = 32;

/// Upper bound on accepted password length in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// A salt and the hash derived from it, both lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub salt: String,
    pub hash: String,
}

/// Generate a random salt as a 32-character hex string.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a password with the given hex salt, or a fresh random salt when
/// `salt` is `None`.
///
/// Deterministic for a fixed `(password, salt)`. Fails with
/// [`AuthError::Validation`] when the salt is empty or not valid hex.
pub fn hash_password(password: &str, salt: Option<&str>) -> Result<PasswordDigest, AuthError> {
    let salt = match salt {
        Some(salt) => salt.to_string(),
        None => generate_salt(),
    };
    let salt_bytes = decode_salt(&salt)?;
    let hash = derive_hex(password, &salt_bytes, PBKDF2_ITERATIONS);
    Ok(PasswordDigest { salt, hash })
}

/// Verify a plaintext password against a stored salt and hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
/// The final comparison runs in constant time.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> Result<bool, AuthError> {
    let computed = hash_password(password, Some(salt))?;
    Ok(computed
        .hash
        .as_bytes()
        .ct_eq(expected_hash.as_bytes())
        .into())
}

/// Validate that a password is usable: non-empty and within the length cap.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation(
            "Password must not be empty".to_string(),
        ));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} bytes"
        )));
    }
    Ok(())
}

fn decode_salt(salt: &str) -> Result<Vec<u8>, AuthError> {
    if salt.is_empty() {
        return Err(AuthError::Validation(
            "Password salt must not be empty".to_string(),
        ));
    }
    hex::decode(salt)
        .map_err(|e| AuthError::Validation(format!("Password salt must be hex encoded: {e}")))
}

fn derive_hex(password: &str, salt: &[u8], iterations: u32) -> String {
    let mut key = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    hex::encode(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_known_pbkdf2_vector() {
        // PBKDF2-HMAC-SHA256, P = "password", S = "salt", c = 1, dkLen = 32.
        let hash = derive_hex("password", b"salt", 1);
        assert_eq!(
            hash,
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_generated_salt_shape() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 32);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(salt, generate_salt(), "salts must be random");
    }

    #[test]
    fn test_hash_shape_and_determinism() {
        let salt = "00112233445566778899aabbccddeeff";
        let a = hash_password("secret123", Some(salt)).expect("hashing should succeed");
        let b = hash_password("secret123", Some(salt)).expect("hashing should succeed");

        assert_eq!(a, b, "same password and salt must give the same hash");
        assert_eq!(a.salt, salt);
        assert_eq!(a.hash.len(), 64);
    }

    #[test]
    fn test_hash_without_salt_generates_one() {
        let digest = hash_password("secret123", None).expect("hashing should succeed");
        assert_eq!(digest.salt.len(), 32);

        let verified =
            verify_password("secret123", &digest.salt, &digest.hash).expect("verify should succeed");
        assert!(verified, "generated salt must round-trip through verify");
    }

    #[test]
    fn test_correct_and_wrong_password() {
        let digest = hash_password("secret123", None).expect("hashing should succeed");

        assert!(verify_password("secret123", &digest.salt, &digest.hash).unwrap());
        assert!(!verify_password("wrong", &digest.salt, &digest.hash).unwrap());
    }

    #[test]
    fn test_different_salts_give_different_hashes() {
        let a = hash_password("secret123", Some("aa".repeat(16).as_str())).unwrap();
        let b = hash_password("secret123", Some("bb".repeat(16).as_str())).unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_hash_mismatch_of_other_length_is_false() {
        let salt = "cd".repeat(16);
        assert!(!verify_password("secret123", &salt, "abc").unwrap());
        assert!(!verify_password("secret123", &salt, "").unwrap());
    }

    #[test]
    fn test_malformed_salt_is_validation_error() {
        assert_matches!(
            hash_password("secret123", Some("not-hex")),
            Err(AuthError::Validation(_))
        );
        assert_matches!(
            hash_password("secret123", Some("abc")),
            Err(AuthError::Validation(_))
        );
        assert_matches!(
            verify_password("secret123", "", "00"),
            Err(AuthError::Validation(_))
        );
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("x").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }
}
