use rusqlite::Connection;

use crate::db::get_year;
use crate::error::{MonthbookError, Result};
use crate::fmt::month_name;

pub struct MonthLine {
    pub name: &'static str,
    pub amount: f64,
    pub updated_at: String,
}

pub struct YearReport {
    pub user_id: String,
    pub year: i32,
    pub months: Vec<MonthLine>,
    pub total: f64,
}

/// Stored months for a user and year, January first. A pair with nothing
/// stored is `NotFound`.
pub fn get_year_report(conn: &Connection, user_id: &str, year: i32) -> Result<YearReport> {
    let rows = get_year(conn, user_id, year)?;
    if rows.is_empty() {
        return Err(MonthbookError::NotFound {
            user: user_id.to_string(),
            year,
        });
    }
    let months: Vec<MonthLine> = rows
        .into_iter()
        .map(|r| MonthLine {
            name: month_name(r.month),
            amount: r.amount,
            updated_at: r.updated_at,
        })
        .collect();
    let total = months.iter().map(|m| m.amount).sum();
    Ok(YearReport {
        user_id: user_id.to_string(),
        year,
        months,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db, upsert_month};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_year_report_names_and_total() {
        let (_dir, conn) = test_db();
        upsert_month(&conn, "alice", 2024, 3, 75.0).unwrap();
        upsert_month(&conn, "alice", 2024, 1, 100.0).unwrap();
        let report = get_year_report(&conn, "alice", 2024).unwrap();
        let names: Vec<&str> = report.months.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["January", "March"]);
        assert_eq!(report.total, 175.0);
    }

    #[test]
    fn test_year_report_not_found() {
        let (_dir, conn) = test_db();
        upsert_month(&conn, "alice", 2024, 1, 1.0).unwrap();
        let err = get_year_report(&conn, "alice", 2023).err().unwrap();
        assert!(matches!(err, MonthbookError::NotFound { year: 2023, .. }));
    }
}
