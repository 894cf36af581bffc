pub mod import;
pub mod init;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db::get_connection;
use crate::error::{MonthbookError, Result};
use crate::settings::Settings;

/// Open the configured database, refusing to create one outside `init`.
pub fn open_db(settings: &Settings) -> Result<Connection> {
    let db_path = settings.db_path();
    if !db_path.exists() {
        return Err(MonthbookError::Settings(format!(
            "No database found at {}\nRun `monthbook init` first.",
            db_path.display()
        )));
    }
    get_connection(&db_path)
}

#[derive(Parser)]
#[command(
    name = "monthbook",
    version,
    about = "Import monthly amounts from spreadsheet exports into a per-user yearly ledger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for monthbook data (default: ~/Documents/monthbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import the first sheet of an XLSX/XLS/ODS or CSV file.
    Import {
        /// Path to the spreadsheet or CSV file
        file: String,
        /// User the amounts belong to
        #[arg(long)]
        user: String,
        /// Year the months belong to
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: i32,
        /// Parse and show the result without saving it
        #[arg(long = "dry-run")]
        dry_run: bool,
        /// List rows that were dropped and why
        #[arg(long = "show-skipped")]
        show_skipped: bool,
    },
    /// Show stored months for a user and year.
    Report {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: i32,
    },
    /// Show the data directory, database, and header labels in use.
    Status,
}
