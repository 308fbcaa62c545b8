//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] outlay_storage::StorageError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] outlay_ledger::LedgerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
