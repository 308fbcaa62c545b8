//! Transaction records and their repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ids;
use crate::Result;
use outlay_storage::Database;

/// A single income or expense entry. `category_id` is a soft reference to
/// a builtin or custom category; nothing enforces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Assigned on add when the caller supplies none
    #[serde(default)]
    pub id: Option<i64>,
    pub amount: f64,
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
}

pub struct TransactionManager {
    db: Database,
}

impl TransactionManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All transactions in insertion order. Identifiers are monotonic, so
    /// ordering by id reproduces the order records were added.
    pub fn all(&self) -> Result<Vec<Transaction>> {
        let result = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, amount, category_id, description, date FROM transactions ORDER BY id",
            )?;

            // A row that fails to decode is a corrupted store, not a row
            // to skip; the whole read fails.
            let transactions = stmt
                .query_map([], |row| {
                    let date_str: String = row.get(4)?;
                    let date = DateTime::parse_from_rfc3339(&date_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                4,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?;

                    Ok(Transaction {
                        id: Some(row.get(0)?),
                        amount: row.get(1)?,
                        category_id: row.get(2)?,
                        description: row.get(3)?,
                        date,
                    })
                })?
                .collect::<std::result::Result<Vec<Transaction>, _>>()?;

            Ok(transactions)
        });

        match result {
            Ok(transactions) => Ok(transactions),
            Err(e) => {
                tracing::error!("Failed to load transactions: {}", e);
                Err(e.into())
            }
        }
    }

    /// Persist a transaction, assigning a time-derived identifier when the
    /// caller supplied none. Returns the identifier actually stored.
    pub fn add(&self, transaction: &Transaction) -> Result<i64> {
        let id = transaction.id.unwrap_or_else(ids::next_id);
        let date = transaction.date.to_rfc3339();

        let result = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO transactions (id, amount, category_id, description, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    id,
                    transaction.amount,
                    transaction.category_id,
                    transaction.description,
                    date,
                ],
            )?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(id),
            Err(e) => {
                tracing::error!("Failed to add transaction: {}", e);
                Err(e.into())
            }
        }
    }

    /// Full-record upsert by identifier: replaces the stored row when the
    /// id exists, inserts it otherwise.
    pub fn update(&self, transaction: &Transaction) -> Result<()> {
        let id = match transaction.id {
            Some(id) => id,
            None => return Err(LedgerError::MissingId),
        };
        let date = transaction.date.to_rfc3339();

        let result = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO transactions (id, amount, category_id, description, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    id,
                    transaction.amount,
                    transaction.category_id,
                    transaction.description,
                    date,
                ],
            )?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to update transaction: {}", e);
                Err(e.into())
            }
        }
    }

    /// Remove a transaction. Deleting an id that is not stored is a no-op.
    pub fn delete(&self, id: i64) -> Result<()> {
        let result = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM transactions WHERE id = ?1", [id])?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to delete transaction: {}", e);
                Err(e.into())
            }
        }
    }

    /// Remove every transaction.
    pub fn clear(&self) -> Result<()> {
        let result = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM transactions", [])?;
            Ok(())
        });

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to clear transactions: {}", e);
                Err(e.into())
            }
        }
    }
}

impl Clone for TransactionManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
