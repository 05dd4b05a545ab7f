//! services/auth/src/error.rs
//!
//! Defines the error types of the auth service.
//!
//! Only `AuthError` ever reaches a caller. `StorageWarning` describes failures of
//! the storage medium, which are absorbed and logged instead of propagated.

use account_core::ports::PortError;

/// Domain-level failures surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// An account with this email already exists (case-insensitive).
    #[error("An account already exists for {email}")]
    DuplicateAccount { email: String },

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// A non-fatal storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageWarning {
    /// The medium could not be read or written.
    #[error("Storage access failed: {0}")]
    Unavailable(#[from] PortError),

    /// The entry exists but does not hold the expected JSON.
    #[error("Malformed data under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
