use super::password::{
    generate_password, hash_password, hash_scheme, is_supported_hash, verify_password,
};
use super::{SecretsError, SecretsResult, SecretsStore};

/// Length of the generated first-run password
pub const FIRST_RUN_PASSWORD_LEN: usize = 14;
/// Minimum length for operator-chosen passwords
pub const MIN_PASSWORD_LEN: usize = 8;

/// Manager password workflow on top of a [`SecretsStore`]
pub struct CredentialService {
    store: Box<dyn SecretsStore>,
}

impl CredentialService {
    pub fn new(store: Box<dyn SecretsStore>) -> Self {
        Self { store }
    }

    /// First run: generate a password, store its hash and keep the plain
    /// text as a one-time token for the operator.
    ///
    /// Returns `true` when a new password was generated.
    pub fn ensure_initialized(&self) -> SecretsResult<bool> {
        if self.store.get_password_hash()?.is_some() {
            return Ok(false);
        }

        let temp = generate_password(FIRST_RUN_PASSWORD_LEN);
        let hash = hash_password(&temp)?;
        self.store.set_password_hash(&hash)?;
        self.store.set_first_run_token(&temp)?;

        crate::security_log!("INFO", "first_run_password_generated");
        Ok(true)
    }

    /// Check `password` against the stored hash.
    ///
    /// A hash in a scheme other than argon2 can never verify; it is reported
    /// as [`SecretsError::UnsupportedHash`] so the operator can reset it with
    /// [`change_password`](Self::change_password).
    pub fn validate_password(&self, password: &str) -> SecretsResult<bool> {
        let valid = match self.store.get_password_hash()? {
            Some(hash) if !is_supported_hash(&hash) => {
                let scheme = hash_scheme(&hash).to_string();
                crate::security_log!("WARN", "unsupported_password_hash", scheme = scheme);
                return Err(SecretsError::UnsupportedHash { scheme });
            }
            Some(hash) => verify_password(password, &hash),
            None => false,
        };
        if !valid {
            crate::security_log!("WARN", "password_rejected");
        }
        Ok(valid)
    }

    pub fn change_password(&self, new_password: &str) -> SecretsResult<()> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SecretsError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        let hash = hash_password(new_password)?;
        self.store.set_password_hash(&hash)?;

        crate::security_log!("INFO", "password_changed");
        Ok(())
    }

    /// The generated first-run password, available exactly once
    pub fn consume_first_run_password(&self) -> SecretsResult<Option<String>> {
        self.store.get_and_clear_first_run_token()
    }
}
