use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_db;
use crate::error::Result;
use crate::fmt::amount;
use crate::reports::get_year_report;
use crate::settings::load_settings;

pub fn run(user: &str, year: i32) -> Result<()> {
    let conn = open_db(&load_settings()?)?;
    let report = get_year_report(&conn, user, year)?;

    let mut table = Table::new();
    table.set_header(vec!["Month", "Amount", "Updated"]);
    for m in &report.months {
        let amt = if m.amount < 0.0 {
            amount(m.amount).red().to_string()
        } else {
            amount(m.amount)
        };
        table.add_row(vec![Cell::new(m.name), Cell::new(amt), Cell::new(&m.updated_at)]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(amount(report.total)),
        Cell::new(""),
    ]);
    println!("{} ({})\n{table}", report.user_id, report.year);
    Ok(())
}
