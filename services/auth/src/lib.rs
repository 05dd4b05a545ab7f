pub mod accounts;
pub mod adapters;
pub mod config;
pub mod digest;
pub mod error;
pub mod records;
pub mod service;
pub mod session;

pub use accounts::AccountStore;
pub use config::{Config, StorageKeys};
pub use error::{AuthError, StorageWarning};
pub use service::AuthService;
pub use session::SessionManager;
