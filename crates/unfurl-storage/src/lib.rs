//! Unfurl Storage Layer
//!
//! Session-scoped key/value persistence used to remember widget state across
//! page loads. Stores are injected capabilities; widgets only ever talk to a
//! [`PersistenceChannel`], which never fails.

mod channel;
mod database;
mod error;
mod migrations;
mod store;

pub use channel::PersistenceChannel;
pub use database::SqliteStore;
pub use error::StorageError;
pub use store::{MemoryStore, SessionStore};

pub type Result<T> = std::result::Result<T, StorageError>;
