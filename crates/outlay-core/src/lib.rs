//! Outlay Core
//!
//! Central coordination layer for the Outlay tracker. Wires the database
//! and the repositories together and runs the legacy import at startup;
//! the UI shell only ever talks to [`App`].

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use outlay_ledger::{
    Budget, BudgetLine, BudgetManager, CategoryManager, CustomCategory, FlatStore, IconType,
    LedgerError, Transaction, TransactionManager,
};
pub use outlay_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
