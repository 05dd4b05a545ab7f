//! crates/account_core/src/ports.rs
//!
//! Defines the storage contract the account and session components depend on.
//! The medium is a synchronous, string-keyed key-value store with best-effort
//! durability and a finite capacity, injected rather than reached for globally.

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Errors raised by a storage medium.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage quota exceeded writing '{key}': needs {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Storage Port (Trait)
//=========================================================================================

/// A persistent string-keyed store. Every call completes before returning.
///
/// A successful `set` fully replaces the value for `key`; a failed one leaves
/// it unchanged. `remove` of an absent key is not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    fn remove(&self, key: &str) -> PortResult<()>;
}
