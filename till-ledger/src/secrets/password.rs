//! Password hashing (argon2) and generation

use super::{SecretsError, SecretsResult};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Hash password using argon2 (salt embedded in the PHC string)
pub fn hash_password(password: &str) -> SecretsResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SecretsError::Hash(e.to_string()))
}

/// Verify password against a stored hash. Unparseable hashes never verify.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Whether `stored_hash` is an argon2 PHC string this module can verify
pub fn is_supported_hash(stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|h| h.algorithm.as_str().starts_with("argon2"))
}

/// Scheme tag of a `$scheme$...` hash, for error reporting
pub fn hash_scheme(stored_hash: &str) -> &str {
    stored_hash
        .split('$')
        .nth(1)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
}

/// Random alphanumeric password
pub fn generate_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
