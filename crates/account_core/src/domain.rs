//! crates/account_core/src/domain.rs
//!
//! Defines the pure, core data structures for accounts and sessions.
//! These structs are independent of any storage medium or serialization format.

use chrono::{DateTime, Utc};

/// A registered account. Created once, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Output of the demonstration digest, never the plaintext password.
    pub credential_digest: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The first word of the display name, as shown in a navigation bar.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Case-insensitive email comparison used for uniqueness and login.
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }
}

// The single active login. A weak reference: the user may no longer exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

/// Input for account registration - contains the plaintext password.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Canonical form of an email for comparisons: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            id: "u_1_abcdef".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            credential_digest: "h0".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn first_name_takes_leading_word() {
        assert_eq!(user("Ana Silva", "a@x.com").first_name(), "Ana");
        assert_eq!(user("Prince", "p@x.com").first_name(), "Prince");
        assert_eq!(user("", "e@x.com").first_name(), "");
    }

    #[test]
    fn email_match_ignores_case_and_padding() {
        let u = user("Ana", "Ana@Ex.com");
        assert!(u.has_email("ana@ex.com"));
        assert!(u.has_email("  ANA@EX.COM "));
        assert!(!u.has_email("ana@ex.org"));
    }
}
