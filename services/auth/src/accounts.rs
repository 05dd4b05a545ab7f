//! services/auth/src/accounts.rs
//!
//! The durable collection of user accounts: creation with email uniqueness,
//! credential lookup, and listing.

use account_core::domain::{NewAccount, User};
use account_core::ports::KeyValueStore;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::StorageKeys;
use crate::digest::credential_digest;
use crate::error::{AuthError, StorageWarning};
use crate::records::{decode_users, encode_users};
use crate::session::SessionManager;

/// Owns the users entry of the store. Creating or finding a user also
/// establishes a session for them through the embedded `SessionManager`.
#[derive(Clone)]
pub struct AccountStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    sessions: SessionManager,
}

impl AccountStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, keys: &StorageKeys) -> Self {
        let sessions = SessionManager::new(storage.clone(), keys.session.clone());
        Self {
            storage,
            key: keys.users.clone(),
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Reads every persisted user, reporting storage problems.
    pub fn try_list_users(&self) -> Result<Vec<User>, StorageWarning> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        decode_users(&raw).map_err(|e| StorageWarning::Malformed {
            key: self.key.clone(),
            source: e,
        })
    }

    /// Every persisted user, or an empty list if the entry cannot be read.
    pub fn list_users(&self) -> Vec<User> {
        self.try_list_users().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Failed to read users");
            Vec::new()
        })
    }

    /// Registers a new account and logs it in.
    ///
    /// Fails with `DuplicateAccount` if the email is already taken, ignoring
    /// case and surrounding whitespace. If the store rejects the write the
    /// returned user is still valid but will not survive a reload.
    pub fn create_user(&self, account: NewAccount) -> Result<User, AuthError> {
        let mut users = self.list_users();
        if users.iter().any(|u| u.has_email(&account.email)) {
            return Err(AuthError::DuplicateAccount {
                email: account.email.trim().to_string(),
            });
        }

        let now = now_millis();
        let user = User {
            id: generate_user_id(now),
            name: account.name.trim().to_string(),
            email: account.email.trim().to_string(),
            credential_digest: credential_digest(&account.password),
            created_at: now,
        };
        users.push(user.clone());
        self.write_users(&users);
        info!(user_id = %user.id, "Account created");

        self.sessions.set_session(&user.id);
        Ok(user)
    }

    /// Finds the user with this email and password and logs them in.
    ///
    /// Any mismatch is reported as `InvalidCredentials`.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let digest = credential_digest(password);
        let user = self
            .list_users()
            .into_iter()
            .find(|u| u.has_email(email) && u.credential_digest == digest)
            .ok_or_else(|| {
                info!("Login rejected");
                AuthError::InvalidCredentials
            })?;

        info!(user_id = %user.id, "Login succeeded");
        self.sessions.set_session(&user.id);
        Ok(user)
    }

    /// Replaces the whole users entry. Failures are logged, not returned.
    fn write_users(&self, users: &[User]) {
        let result = encode_users(users)
            .map_err(|e| StorageWarning::Malformed {
                key: self.key.clone(),
                source: e,
            })
            .and_then(|raw| {
                self.storage
                    .set(&self.key, &raw)
                    .map_err(StorageWarning::from)
            });
        if let Err(e) = result {
            warn!(key = %self.key, error = %e, "Failed to persist users");
        }
    }
}

// Stored at millisecond precision, so truncate to keep reads equal to the original.
fn now_millis() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(Utc::now().timestamp_millis())
        .single()
        .unwrap_or_else(Utc::now)
}

/// `u_<epoch millis>_<6 random hex chars>`.
fn generate_user_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("u_{}_{}", now.timestamp_millis(), &random[..6])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    fn store() -> (Arc<MemoryStore>, AccountStore) {
        let memory = Arc::new(MemoryStore::new());
        let accounts = AccountStore::new(memory.clone(), &StorageKeys::default());
        (memory, accounts)
    }

    #[test]
    fn ids_have_time_and_random_parts() {
        let now = Utc::now();
        let a = generate_user_id(now);
        let b = generate_user_id(now);
        assert!(a.starts_with(&format!("u_{}_", now.timestamp_millis())));
        assert_eq!(a.rsplit('_').next().map(str::len), Some(6));
        assert_ne!(a, b);
    }

    #[test]
    fn create_trims_and_digests() {
        let (_, accounts) = store();
        let user = accounts
            .create_user(NewAccount::new("  Ana Silva ", " Ana@Ex.com ", "p1"))
            .unwrap();
        assert_eq!(user.name, "Ana Silva");
        assert_eq!(user.email, "Ana@Ex.com");
        assert_eq!(user.credential_digest, "h3521");
        assert_eq!(accounts.list_users(), vec![user.clone()]);
        assert_eq!(
            accounts.sessions().get_session().map(|s| s.user_id),
            Some(user.id)
        );
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let (_, accounts) = store();
        accounts
            .create_user(NewAccount::new("Ana", "ana@ex.com", "p1"))
            .unwrap();
        let err = accounts
            .create_user(NewAccount::new("Other", " ANA@EX.COM", "p2"))
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::DuplicateAccount {
                email: "ANA@EX.COM".to_string()
            }
        );
        assert_eq!(accounts.list_users().len(), 1);
    }

    #[test]
    fn credentials_must_both_match() {
        let (_, accounts) = store();
        accounts
            .create_user(NewAccount::new("Ana", "ana@ex.com", "p1"))
            .unwrap();
        accounts
            .create_user(NewAccount::new("Bia", "bia@ex.com", "p2"))
            .unwrap();

        assert_eq!(
            accounts.find_by_credentials("ana@ex.com", "p2"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            accounts.find_by_credentials("nobody@ex.com", "p1"),
            Err(AuthError::InvalidCredentials)
        );
        let ana = accounts.find_by_credentials("ANA@ex.com", "p1").unwrap();
        assert_eq!(ana.name, "Ana");
        assert_eq!(
            accounts.sessions().get_session().map(|s| s.user_id),
            Some(ana.id)
        );
    }

    #[test]
    fn corrupt_users_entry_lists_empty() {
        let (memory, accounts) = store();
        memory.set("app_users_v1", "definitely not json").unwrap();
        assert!(matches!(
            accounts.try_list_users(),
            Err(StorageWarning::Malformed { .. })
        ));
        assert!(accounts.list_users().is_empty());
        assert_eq!(
            accounts.find_by_credentials("a@x.com", "p"),
            Err(AuthError::InvalidCredentials)
        );
    }
}
