//! Legacy flat store import
//!
//! Older releases kept everything in a single key-value file of
//! serialized text: a transaction array under `expense-transactions` and
//! a budget object under `expense-budget`. The import copies that data
//! into the structured store exactly once; it runs on every startup and
//! the emptiness guards make later runs no-ops.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::budget::{Budget, BudgetManager};
use crate::transaction::{Transaction, TransactionManager};
use crate::Result;

pub const TRANSACTIONS_KEY: &str = "expense-transactions";
pub const BUDGET_KEY: &str = "expense-budget";

/// Read-only view of the legacy key-value file. Never written by this
/// system; the old data stays behind as-is after the import.
pub struct FlatStore {
    path: PathBuf,
}

impl FlatStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The serialized text stored under `key`. A missing file or a
    /// missing key is `None`, not an error.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&raw)?;
        Ok(entries.get(key).cloned())
    }
}

/// One-shot import of legacy flat-store data into the structured store.
///
/// Transactions are copied only when the transaction collection is empty;
/// the budget only when no budget row exists yet. Returns false when any
/// step failed; it never raises, so startup is never blocked. Progress
/// made before a failure is kept.
pub fn import_flat_store(
    store: &FlatStore,
    transactions: &TransactionManager,
    budget: &BudgetManager,
) -> bool {
    match run_import(store, transactions, budget) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Legacy import failed: {}", e);
            false
        }
    }
}

fn run_import(
    store: &FlatStore,
    transactions: &TransactionManager,
    budget: &BudgetManager,
) -> Result<()> {
    let existing_transactions = transactions.all()?;
    let existing_budget = budget.get();

    if existing_transactions.is_empty() {
        if let Some(raw) = store.get(TRANSACTIONS_KEY)? {
            let legacy: Vec<Transaction> = serde_json::from_str(&raw)?;
            for transaction in &legacy {
                transactions.add(transaction)?;
            }
            tracing::info!(count = legacy.len(), "Imported legacy transactions");
        }
    }

    if existing_budget.id.is_none() {
        if let Some(raw) = store.get(BUDGET_KEY)? {
            let legacy: Budget = serde_json::from_str(&raw)?;
            budget.save(&legacy)?;
            tracing::info!("Imported legacy budget");
        }
    }

    Ok(())
}
