//! Password hashing
//!
//! Passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`). Plaintext never reaches
//! the database and there is no way to read it back, only to verify.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use taxi_common::TaxiError;

/// Hash a raw password with a fresh random salt
pub fn hash_password(raw_password: &str) -> taxi_common::Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);

    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| TaxiError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .hash_password(raw_password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TaxiError::PasswordHash(e.to_string()))
}

/// Verify a raw password against a stored PHC string.
///
/// A malformed stored hash verifies nothing.
pub fn verify_password(raw_password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(raw_password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        },
    }
}
