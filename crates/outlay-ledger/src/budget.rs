//! The singleton budget record and its repository

use serde::{Deserialize, Serialize};

use crate::Result;
use outlay_storage::Database;

/// One named line item inside the budget (a fixed expense or a
/// subscription).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub name: String,
    pub amount: f64,
}

/// The single budget record. At most one row exists at a time; `save`
/// keeps overwriting it in place once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub fixed_expenses: Vec<BudgetLine>,
    #[serde(default)]
    pub subscriptions: Vec<BudgetLine>,
}

pub struct BudgetManager {
    db: Database,
}

impl BudgetManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The current budget, or the zero default when none has been saved
    /// yet. A store failure also yields the default so callers always
    /// have something to render; the error is only logged.
    pub fn get(&self) -> Budget {
        let result = self.db.with_connection(|conn| {
            let row = conn.query_row(
                "SELECT id, income, fixed_expenses, subscriptions FROM budget
                 ORDER BY id LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            );

            match row {
                Ok((id, income, fixed_json, subscriptions_json)) => {
                    let fixed_expenses = serde_json::from_str(&fixed_json).unwrap_or_default();
                    let subscriptions =
                        serde_json::from_str(&subscriptions_json).unwrap_or_default();

                    Ok(Some(Budget {
                        id: Some(id),
                        income,
                        fixed_expenses,
                        subscriptions,
                    }))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        });

        match result {
            Ok(Some(budget)) => budget,
            Ok(None) => Budget::default(),
            Err(e) => {
                tracing::error!("Failed to load budget, using default: {}", e);
                Budget::default()
            }
        }
    }

    /// Persist the budget, overwriting the existing row in place when one
    /// exists (its identifier is stable across saves) and creating the row
    /// otherwise. Returns the row identifier.
    pub fn save(&self, budget: &Budget) -> Result<i64> {
        let fixed_json = serde_json::to_string(&budget.fixed_expenses)?;
        let subscriptions_json = serde_json::to_string(&budget.subscriptions)?;

        // Read and write under one lock so two saves can never race into
        // creating a second row.
        let result = self.db.with_connection(|conn| {
            let existing = match conn.query_row(
                "SELECT id FROM budget ORDER BY id LIMIT 1",
                [],
                |row| row.get::<_, i64>(0),
            ) {
                Ok(id) => Some(id),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e.into()),
            };

            let id = match (existing, budget.id) {
                (Some(id), _) => {
                    conn.execute(
                        "UPDATE budget SET income = ?1, fixed_expenses = ?2, subscriptions = ?3
                         WHERE id = ?4",
                        rusqlite::params![budget.income, fixed_json, subscriptions_json, id],
                    )?;
                    id
                }
                (None, Some(id)) => {
                    conn.execute(
                        "INSERT INTO budget (id, income, fixed_expenses, subscriptions)
                         VALUES (?1, ?2, ?3, ?4)",
                        rusqlite::params![id, budget.income, fixed_json, subscriptions_json],
                    )?;
                    id
                }
                (None, None) => {
                    conn.execute(
                        "INSERT INTO budget (income, fixed_expenses, subscriptions)
                         VALUES (?1, ?2, ?3)",
                        rusqlite::params![budget.income, fixed_json, subscriptions_json],
                    )?;
                    conn.last_insert_rowid()
                }
            };

            Ok(id)
        });

        match result {
            Ok(id) => Ok(id),
            Err(e) => {
                tracing::error!("Failed to save budget: {}", e);
                Err(e.into())
            }
        }
    }

    /// Remove the budget record entirely; `get` returns the default
    /// afterwards.
    pub fn clear(&self) -> Result<()> {
        let result = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM budget", [])?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to clear budget: {}", e);
                Err(e.into())
            }
        }
    }
}

impl Clone for BudgetManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
