//! services/auth/src/config.rs
//!
//! Defines the service configuration and its loading logic.
//!
//! All configuration is loaded from environment variables. The `.env` file is
//! used for local development.

use std::path::PathBuf;

/// Default capacity of the storage medium, matching typical browser limits.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// The two independent entries the service persists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub users: String,
    pub session: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            users: "app_users_v1".to_string(),
            session: "app_session_v1".to_string(),
        }
    }
}

/// Holds all configuration loaded at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub keys: StorageKeys,
    /// `None` keeps everything in memory for the life of the process.
    pub storage_path: Option<PathBuf>,
    /// `None` means unbounded.
    pub quota_bytes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            storage_path: None,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test builds to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StorageKeys::default();

        // --- Storage Keys ---
        let users = lookup("AUTH_USERS_KEY").unwrap_or(defaults.users);
        let session = lookup("AUTH_SESSION_KEY").unwrap_or(defaults.session);
        if users == session {
            return Err(ConfigError::InvalidValue(
                "AUTH_SESSION_KEY".to_string(),
                format!("'{}' is already used for the users entry", session),
            ));
        }

        // --- Storage Medium ---
        let storage_path = lookup("AUTH_STORAGE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let quota_bytes = match lookup("AUTH_STORAGE_QUOTA_BYTES") {
            None => Some(DEFAULT_QUOTA_BYTES),
            Some(raw) => {
                let bytes = raw.trim().parse::<usize>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "AUTH_STORAGE_QUOTA_BYTES".to_string(),
                        format!("'{}' is not a byte count", raw),
                    )
                })?;
                (bytes > 0).then_some(bytes)
            }
        };

        Ok(Self {
            keys: StorageKeys { users, session },
            storage_path,
            quota_bytes,
        })
    }
}
