use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_db;
use crate::error::Result;
use crate::fmt::{amount, month_name};
use crate::importer::{import_file, preview_file, ImportResult};
use crate::settings::load_settings;

pub fn run(file: &str, user: &str, year: i32, dry_run: bool, show_skipped: bool) -> Result<()> {
    let file_path = PathBuf::from(file);
    let settings = load_settings()?;

    let result = if dry_run {
        preview_file(&file_path, &settings.header)?
    } else {
        let conn = open_db(&settings)?;
        import_file(&conn, &file_path, user, year, &settings.header)?
    };

    print_records(&result);
    if show_skipped {
        print_skipped(&result);
    }

    if dry_run {
        println!("Dry run: nothing saved for {user} in {year}.");
    } else {
        if let Some(when) = &result.previously_imported {
            println!("{}", format!("This file was already imported on {when}.").yellow());
        }
        println!(
            "{} months saved for {user} in {year}: {} new, {} updated, {} rows skipped",
            result.records.len(),
            result.inserted,
            result.updated,
            result.skipped.len()
        );
    }
    Ok(())
}

fn print_records(result: &ImportResult) {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Amount"]);
    for record in result.records.iter() {
        table.add_row(vec![
            Cell::new(month_name(record.month)),
            Cell::new(amount(record.amount)),
        ]);
    }
    println!("Header found on row {}\n{table}", result.header_row + 1);
}

fn print_skipped(result: &ImportResult) {
    if result.skipped.is_empty() {
        println!("No rows skipped.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Row", "Reason"]);
    for skip in &result.skipped {
        table.add_row(vec![
            Cell::new(skip.row + 1),
            Cell::new(skip.reason.to_string().red()),
        ]);
    }
    println!("Skipped rows ({})\n{table}", result.skipped.len());
}
