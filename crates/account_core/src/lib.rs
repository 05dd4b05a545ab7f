pub mod domain;
pub mod ports;

pub use domain::{normalize_email, NewAccount, Session, User};
pub use ports::{KeyValueStore, PortError, PortResult};
