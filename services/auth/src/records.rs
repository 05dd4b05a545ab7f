//! services/auth/src/records.rs
//!
//! The JSON shapes persisted in the key-value store, and their mapping to the
//! pure domain types in `account_core`.

use account_core::domain::{Session, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//=========================================================================================
// "Impure" Storage Record Structs
//=========================================================================================

/// One element of the users entry: `{id, name, email, credentialDigest, createdAt}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    id: String,
    name: String,
    email: String,
    // Older clients wrote the digest as `passwordHash`.
    #[serde(alias = "passwordHash")]
    credential_digest: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            credential_digest: user.credential_digest.clone(),
            created_at: user.created_at,
        }
    }

    pub fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            credential_digest: self.credential_digest,
            created_at: self.created_at,
        }
    }
}

/// The session entry: `{userId}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    user_id: String,
}

impl SessionRecord {
    pub fn from_domain(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
        }
    }

    /// An empty `userId` is no session at all.
    pub fn to_domain(self) -> Option<Session> {
        if self.user_id.is_empty() {
            return None;
        }
        Some(Session {
            user_id: self.user_id,
        })
    }
}

//=========================================================================================
// Entry Codecs
//=========================================================================================

/// Decodes the users entry. A JSON `null` is an empty collection.
pub fn decode_users(raw: &str) -> Result<Vec<User>, serde_json::Error> {
    let records: Option<Vec<UserRecord>> = serde_json::from_str(raw)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(UserRecord::to_domain)
        .collect())
}

pub fn encode_users(users: &[User]) -> Result<String, serde_json::Error> {
    let records: Vec<UserRecord> = users.iter().map(UserRecord::from_domain).collect();
    serde_json::to_string(&records)
}

/// Decodes the session entry. `null` and `{}` decode to no session.
pub fn decode_session(raw: &str) -> Result<Option<Session>, serde_json::Error> {
    let record: Option<SessionRecord> = serde_json::from_str(raw)?;
    Ok(record.and_then(SessionRecord::to_domain))
}

pub fn encode_session(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SessionRecord::from_domain(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_entry_uses_camel_case_and_millis() {
        let user = User {
            id: "u_1700000000000_a1b2c3".to_string(),
            name: "Ana Silva".to_string(),
            email: "Ana@Ex.com".to_string(),
            credential_digest: "h3521".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&encode_users(&[user]).unwrap()).unwrap();
        assert_eq!(json[0]["credentialDigest"], "h3521");
        assert_eq!(json[0]["createdAt"], 1_700_000_000_123i64);
        assert_eq!(json[0]["email"], "Ana@Ex.com");
    }

    #[test]
    fn reads_legacy_password_hash_field() {
        let raw = r#"[{"id":"u_1_x","name":"Ana","email":"a@x.com","passwordHash":"h3521","createdAt":1}]"#;
        let users = decode_users(raw).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].credential_digest, "h3521");
    }

    #[test]
    fn null_users_entry_is_empty() {
        assert!(decode_users("null").unwrap().is_empty());
        assert!(decode_users("{\"id\":1}").is_err());
        assert!(decode_users("not json").is_err());
    }

    #[test]
    fn session_decoding() {
        assert_eq!(
            decode_session(r#"{"userId":"u_1_x"}"#).unwrap(),
            Some(Session {
                user_id: "u_1_x".to_string()
            })
        );
        assert_eq!(decode_session("null").unwrap(), None);
        assert_eq!(decode_session("{}").unwrap(), None);
        assert_eq!(decode_session(r#"{"userId":""}"#).unwrap(), None);
        assert!(decode_session("[").is_err());
    }
}
