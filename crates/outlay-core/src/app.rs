//! Main application state container
//!
//! The shell constructs one [`App`] at startup, calls
//! [`App::import_legacy`] before its first read, and routes every
//! repository call through the accessors. Rust owns all persisted state;
//! the UI is purely a renderer.

use outlay_ledger::{
    import_flat_store, BudgetManager, CategoryManager, FlatStore, TransactionManager,
};
use outlay_storage::Database;

use crate::config::Config;
use crate::Result;

/// The single application instance.
///
/// Opens the database once and hands handle clones to the repositories;
/// there is no global singleton, only this owned value.
pub struct App {
    config: Config,
    db: Database,
    transactions: TransactionManager,
    budget: BudgetManager,
    categories: CategoryManager,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;

        let transactions = TransactionManager::new(db.clone());
        let budget = BudgetManager::new(db.clone());
        let categories = CategoryManager::new(db.clone());

        tracing::info!(path = %config.database_path.display(), "Application store opened");

        Ok(Self {
            config,
            db,
            transactions,
            budget,
            categories,
        })
    }

    /// Import data left behind by the old flat-store release.
    ///
    /// Runs the emptiness-guarded one-shot copy; safe to call on every
    /// startup. Returns false when the import failed, which never blocks
    /// startup - the caller just continues with whatever is in the store.
    pub fn import_legacy(&self) -> bool {
        let store = FlatStore::new(&self.config.legacy_store_path);
        import_flat_store(&store, &self.transactions, &self.budget)
    }

    pub fn transactions(&self) -> &TransactionManager {
        &self.transactions
    }

    pub fn budget(&self) -> &BudgetManager {
        &self.budget
    }

    pub fn categories(&self) -> &CategoryManager {
        &self.categories
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Tear the instance down, closing the database.
    ///
    /// A long-lived process never needs this; tests use it to release the
    /// file before inspecting or reopening it.
    pub fn close(self) -> Result<()> {
        let Self {
            db,
            transactions,
            budget,
            categories,
            ..
        } = self;

        // The repositories hold the only other handles; drop them so the
        // database handle is the last one standing.
        drop(transactions);
        drop(budget);
        drop(categories);

        Ok(db.close()?)
    }
}
