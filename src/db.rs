use std::path::Path;

use log::debug;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{RecordSet, StoredAmount};

pub const DB_FILE: &str = "monthbook.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS monthly_amounts (
    id INTEGER PRIMARY KEY,
    user_id TEXT NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    amount REAL NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    UNIQUE (user_id, year, month)
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    user_id TEXT NOT NULL,
    year INTEGER NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    record_count INTEGER NOT NULL,
    skipped_count INTEGER NOT NULL,
    checksum TEXT NOT NULL
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn month_exists(conn: &Connection, user_id: &str, year: i32, month: u32) -> Result<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM monthly_amounts WHERE user_id = ?1 AND year = ?2 AND month = ?3",
    )?;
    Ok(stmt.exists(rusqlite::params![user_id, year, month])?)
}

pub fn upsert_month(conn: &Connection, user_id: &str, year: i32, month: u32, amount: f64) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO monthly_amounts (user_id, year, month, amount) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT (user_id, year, month) DO UPDATE SET \
         amount = excluded.amount, updated_at = datetime('now')",
    )?
    .execute(rusqlite::params![user_id, year, month, amount])?;
    Ok(())
}

pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
}

/// Apply every month of `records` for one user and year. The caller owns the
/// transaction so the import log can commit together with the amounts.
pub fn upsert_records(conn: &Connection, user_id: &str, year: i32, records: &RecordSet) -> Result<UpsertCounts> {
    let mut counts = UpsertCounts { inserted: 0, updated: 0 };
    for record in records.iter() {
        if month_exists(conn, user_id, year, record.month)? {
            counts.updated += 1;
        } else {
            counts.inserted += 1;
        }
        upsert_month(conn, user_id, year, record.month, record.amount)?;
    }
    debug!(
        "upserted {} months for {user_id}/{year} ({} new)",
        records.len(),
        counts.inserted
    );
    Ok(counts)
}

pub fn get_year(conn: &Connection, user_id: &str, year: i32) -> Result<Vec<StoredAmount>> {
    let mut stmt = conn.prepare(
        "SELECT month, amount, updated_at FROM monthly_amounts \
         WHERE user_id = ?1 AND year = ?2 ORDER BY month ASC",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, year], |row| {
            Ok(StoredAmount {
                month: row.get(0)?,
                amount: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct ImportLog<'a> {
    pub filename: &'a str,
    pub user_id: &'a str,
    pub year: i32,
    pub record_count: usize,
    pub skipped_count: usize,
    pub checksum: &'a str,
}

pub fn record_import(conn: &Connection, log: &ImportLog<'_>) -> Result<()> {
    conn.execute(
        "INSERT INTO imports (filename, user_id, year, record_count, skipped_count, checksum) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            log.filename,
            log.user_id,
            log.year,
            log.record_count as i64,
            log.skipped_count as i64,
            log.checksum,
        ],
    )?;
    Ok(())
}

/// When a file with this checksum was last imported for the user and year.
pub fn last_import_of(conn: &Connection, checksum: &str, user_id: &str, year: i32) -> Result<Option<String>> {
    let date = conn
        .query_row(
            "SELECT import_date FROM imports WHERE checksum = ?1 AND user_id = ?2 AND year = ?3 \
             ORDER BY id DESC LIMIT 1",
            rusqlite::params![checksum, user_id, year],
            |row| row.get(0),
        )
        .optional()?;
    Ok(date)
}
