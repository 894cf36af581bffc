use std::path::Path;

use log::{info, warn};
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::aggregate::SkippedRow;
use crate::db::{last_import_of, record_import, upsert_records, ImportLog};
use crate::error::Result;
use crate::header::HeaderVocabulary;
use crate::models::RecordSet;
use crate::pipeline::ingest;
use crate::workbook::load_grid;

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    Ok(hex::encode(Sha256::digest(&data)))
}

#[derive(Debug)]
pub struct ImportResult {
    pub records: RecordSet,
    pub skipped: Vec<SkippedRow>,
    pub header_row: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Set when the same file was already imported for this user and year.
    pub previously_imported: Option<String>,
}

/// Read the first sheet of `file_path` and normalize it without touching the
/// database.
pub fn preview_file(file_path: &Path, vocabulary: &HeaderVocabulary) -> Result<ImportResult> {
    let grid = load_grid(file_path)?;
    let ingestion = ingest(&grid, vocabulary)?;
    info!(
        "{}: header at row {}, {} months, {} rows skipped",
        file_path.display(),
        ingestion.header.row + 1,
        ingestion.records.len(),
        ingestion.skipped.len()
    );
    Ok(ImportResult {
        records: ingestion.records,
        skipped: ingestion.skipped,
        header_row: ingestion.header.row,
        inserted: 0,
        updated: 0,
        previously_imported: None,
    })
}

/// Normalize `file_path` and upsert its months for `user_id` in `year`.
pub fn import_file(
    conn: &Connection,
    file_path: &Path,
    user_id: &str,
    year: i32,
    vocabulary: &HeaderVocabulary,
) -> Result<ImportResult> {
    let checksum = compute_checksum(file_path)?;
    let previously_imported = last_import_of(conn, &checksum, user_id, year)?;
    if let Some(when) = &previously_imported {
        warn!("{} was already imported for {user_id}/{year} on {when}", file_path.display());
    }

    let mut result = preview_file(file_path, vocabulary)?;
    let tx = conn.unchecked_transaction()?;
    let counts = upsert_records(&tx, user_id, year, &result.records)?;
    record_import(
        &tx,
        &ImportLog {
            filename: file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            user_id,
            year,
            record_count: result.records.len(),
            skipped_count: result.skipped.len(),
            checksum: &checksum,
        },
    )?;
    tx.commit()?;

    result.inserted = counts.inserted;
    result.updated = counts.updated;
    result.previously_imported = previously_imported;
    Ok(result)
}
