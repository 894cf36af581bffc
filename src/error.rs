use thiserror::Error;

/// Sheet-level failures of the ingestion pipeline. Row-level problems never
/// surface here; they become skipped-row diagnostics instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("No header row with month and amount columns in the first {scanned} rows")]
    HeaderNotFound { scanned: usize },

    #[error("No valid rows below the header")]
    NoValidRows,
}

#[derive(Error, Debug)]
pub enum MonthbookError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Workbook has no sheets")]
    EmptyWorkbook,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No records found for user {user} in {year}")]
    NotFound { user: String, year: i32 },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, MonthbookError>;
