//! Outlay Storage Layer
//!
//! SQLite-based persistence for all tracker state. The transaction,
//! budget, and custom category collections live in one schema-versioned
//! database behind a shared handle.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
