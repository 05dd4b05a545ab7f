//! services/auth/src/service.rs
//!
//! The `AuthService` facade: the operations a presentation layer (navbar widget,
//! account page) calls into. It is created once at startup and shared.

use account_core::domain::{NewAccount, User};
use account_core::ports::KeyValueStore;
use std::sync::Arc;
use tracing::info;

use crate::accounts::AccountStore;
use crate::adapters::{FileStore, MemoryStore};
use crate::config::{Config, StorageKeys};
use crate::error::AuthError;

#[derive(Clone)]
pub struct AuthService {
    accounts: AccountStore,
}

impl AuthService {
    /// Creates the service over an injected storage medium.
    pub fn new(storage: Arc<dyn KeyValueStore>, keys: &StorageKeys) -> Self {
        Self {
            accounts: AccountStore::new(storage, keys),
        }
    }

    /// Builds the storage adapter described by `config` and the service over it.
    pub fn from_config(config: &Config) -> Self {
        let storage: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => {
                info!(path = %path.display(), "Using file-backed storage");
                Arc::new(FileStore::new(path.clone(), config.quota_bytes))
            }
            None => {
                info!("Using in-memory storage");
                Arc::new(match config.quota_bytes {
                    Some(limit) => MemoryStore::with_quota(limit),
                    None => MemoryStore::new(),
                })
            }
        };
        Self::new(storage, &config.keys)
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Registers an account and makes it the current user.
    pub fn create_user(&self, account: NewAccount) -> Result<User, AuthError> {
        self.accounts.create_user(account)
    }

    /// Logs in with email and password, making the user current.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.accounts.find_by_credentials(email, password)
    }

    /// The logged-in user, if any.
    pub fn get_current_user(&self) -> Option<User> {
        self.accounts.sessions().get_current_user(&self.accounts)
    }

    pub fn logout(&self) {
        self.accounts.sessions().logout();
    }
}
