//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::Result;

/// Handle to the tracker database.
///
/// Cheap to clone; every clone shares one connection behind a mutex. The
/// process opens the database once and hands clones to the repositories.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and bring the schema up to
    /// the current version.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory database for tests; fully migrated, fully isolated.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with exclusive access to the connection.
    ///
    /// The lock is held for the whole closure, so a read-then-write
    /// sequence inside one call cannot interleave with other handles.
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Close the underlying connection.
    ///
    /// Only the last live handle can close; with clones outstanding this
    /// returns [`StorageError::HandleInUse`]. A long-lived process never
    /// needs to call it — tests use it to tear down cleanly.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner();
                conn.close().map_err(|(_, e)| StorageError::Sqlite(e))?;
                Ok(())
            }
            Err(_) => Err(StorageError::HandleInUse),
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outlay.db");

        let db = Database::open(&path).unwrap();
        db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO transactions (id, amount, category_id, description, date)
                 VALUES (1, 9.5, 'food', 'coffee', '2024-01-01T00:00:00+00:00')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        db.close().unwrap();

        let reopened = Database::open(&path).unwrap();
        let count: i64 = reopened
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_close_requires_last_handle() {
        let db = Database::open_in_memory().unwrap();
        let clone = db.clone();

        let err = db.close().unwrap_err();
        assert!(matches!(err, StorageError::HandleInUse));

        // The remaining handle still works and can close.
        clone
            .with_connection(|conn| {
                conn.execute("DELETE FROM transactions", [])?;
                Ok(())
            })
            .unwrap();
        clone.close().unwrap();
    }
}
