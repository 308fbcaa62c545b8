//! Outlay Ledger
//!
//! Repositories over the structured store:
//! - Transactions: full CRUD, fail-hard
//! - Budget: a singleton record, fail-soft reads
//! - Custom categories: user-defined additions to the builtin set
//! - Legacy import: one-shot copy of old flat-store data, runs at startup
//!
//! Repositories hold no state of their own; every record lives in the
//! shared [`outlay_storage::Database`].

mod budget;
mod category;
mod error;
mod ids;
mod legacy;
mod transaction;

pub use budget::{Budget, BudgetLine, BudgetManager};
pub use category::{CategoryManager, CustomCategory, IconType};
pub use error::LedgerError;
pub use legacy::{import_flat_store, FlatStore, BUDGET_KEY, TRANSACTIONS_KEY};
pub use transaction::{Transaction, TransactionManager};

pub type Result<T> = std::result::Result<T, LedgerError>;
