//! services/auth/src/session.rs
//!
//! The single active-session pointer and its resolution to a user.

use account_core::domain::{Session, User};
use account_core::ports::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::accounts::AccountStore;
use crate::error::StorageWarning;
use crate::records::{decode_session, encode_session};

/// Owns the session entry of the store. At most one session exists.
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Points the session at `user_id`, replacing any previous one.
    ///
    /// Durability is best-effort: a failed write is logged and otherwise ignored.
    pub fn set_session(&self, user_id: &str) {
        let session = Session {
            user_id: user_id.to_string(),
        };
        let result = encode_session(&session)
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
            warn!(key = %self.key, error = %e, "Failed to persist session");
        }
    }

    /// Reads the session, reporting storage problems instead of hiding them.
    pub fn try_get_session(&self) -> Result<Option<Session>, StorageWarning> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        decode_session(&raw).map_err(|e| StorageWarning::Malformed {
            key: self.key.clone(),
            source: e,
        })
    }

    /// The persisted session, or `None` if missing, unreadable or malformed.
    pub fn get_session(&self) -> Option<Session> {
        self.try_get_session().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Failed to read session");
            None
        })
    }

    /// Resolves the session to a user in `accounts`.
    ///
    /// A session naming an id that no longer exists is a normal state and
    /// yields `None`.
    pub fn get_current_user(&self, accounts: &AccountStore) -> Option<User> {
        let Some(session) = self.get_session() else {
            debug!("No active session");
            return None;
        };
        let user = accounts
            .list_users()
            .into_iter()
            .find(|u| u.id == session.user_id);
        if user.is_none() {
            debug!(user_id = %session.user_id, "Session refers to an unknown user");
        }
        user
    }

    /// Removes the session. Calling it without a session is fine.
    pub fn logout(&self) {
        match self.storage.remove(&self.key) {
            Ok(()) => info!("Session cleared"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to clear session"),
        }
    }
}
