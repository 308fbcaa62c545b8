//! Database migrations
//!
//! Version 1 creates the transaction and budget collections; version 2
//! adds custom categories. Migrations only ever add schema; rows in
//! collections that already exist are never rewritten.

use crate::Result;
use rusqlite::Connection;

const SCHEMA_VERSION: i32 = 2;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<i32, _> =
        conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        });

    match result {
        Ok(v) => Ok(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(_, _)) => {
            // Table doesn't exist yet
            conn.execute(
                "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
                [],
            )?;
            conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])?;
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<()> {
    tracing::info!("Running migration v1: transactions and budget");

    // Transaction identifiers are assigned by the application (time
    // derived), so the column is a plain INTEGER PRIMARY KEY. category_id
    // is a soft reference to a builtin or custom category; no FK.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            category_id TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;

    // The budget table holds at most one row; the repository enforces
    // that, the store just assigns the row id.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            income REAL NOT NULL DEFAULT 0,
            fixed_expenses TEXT NOT NULL DEFAULT '[]',
            subscriptions TEXT NOT NULL DEFAULT '[]'
        );
    "#,
    )?;

    Ok(())
}

fn migrate_v2(conn: &Connection) -> Result<()> {
    tracing::info!("Running migration v2: custom categories");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS custom_categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT '',
            image TEXT,
            icon_type TEXT NOT NULL DEFAULT 'icon',
            dark_color TEXT NOT NULL DEFAULT '',
            light_color TEXT NOT NULL DEFAULT '',
            is_custom INTEGER NOT NULL DEFAULT 1
        );
    "#,
    )?;

    Ok(())
}
