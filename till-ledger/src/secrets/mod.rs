//! Operator credentials
//!
//! The ledger itself never touches passwords. This module owns the secrets
//! file (password hash + one-time first-run password), argon2 hashing, and
//! the [`CredentialService`] presentation layers use to gate manager actions.

mod credentials;
pub mod password;
mod store;

pub use credentials::{CredentialService, FIRST_RUN_PASSWORD_LEN, MIN_PASSWORD_LEN};
pub use store::{JsonSecretsStore, SecretsStore};

use thiserror::Error;

/// Secrets errors
#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Stored hash is not argon2 (e.g. a bcrypt `$2b$` hash from older installs)
    #[error("Stored password hash uses unsupported scheme '{scheme}', set a new password")]
    UnsupportedHash { scheme: String },
}

pub type SecretsResult<T> = Result<T, SecretsError>;

impl From<SecretsError> for shared::AppError {
    fn from(err: SecretsError) -> Self {
        use shared::ErrorCode;
        match err {
            SecretsError::PasswordTooShort { .. } => {
                Self::with_message(ErrorCode::PasswordTooShort, err.to_string())
            }
            SecretsError::UnsupportedHash { .. } => {
                Self::with_message(ErrorCode::ConfigError, err.to_string())
            }
            SecretsError::Hash(msg) => Self::internal(msg),
            SecretsError::Io(e) => Self::with_message(ErrorCode::SystemBusy, e.to_string()),
            SecretsError::Serialization(e) => {
                Self::with_message(ErrorCode::ConfigError, e.to_string())
            }
        }
    }
}
