use std::fmt;

use crate::cell::Cell;
use crate::error::IngestError;
use crate::header::HeaderLocation;
use crate::models::RecordSet;
use crate::normalize::{parse_amount, resolve_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnresolvedMonth,
    UnresolvedAmount,
    Unresolved,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnresolvedMonth => "unrecognized month",
            Self::UnresolvedAmount => "unrecognized amount",
            Self::Unresolved => "unrecognized month and amount",
        };
        f.write_str(s)
    }
}

/// A data row that was dropped, by zero-based grid row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub records: RecordSet,
    pub skipped: Vec<SkippedRow>,
}

static ABSENT: Cell = Cell::Empty;

/// Collect month/amount pairs from every row below the header. Rows that do
/// not fully resolve are dropped and reported in `skipped`; nothing is filled
/// in for them.
pub fn aggregate(grid: &[Vec<Cell>], header: &HeaderLocation) -> Result<Aggregation, IngestError> {
    let mut records = RecordSet::new();
    let mut skipped = Vec::new();

    for (row_idx, row) in grid.iter().enumerate().skip(header.row + 1) {
        // Blank sheet rows come through as all-absent cells.
        if row.iter().all(|c| matches!(c, Cell::Empty)) {
            continue;
        }
        let month = resolve_month(row.get(header.month_col).unwrap_or(&ABSENT));
        let amount = parse_amount(row.get(header.amount_col).unwrap_or(&ABSENT));
        match (month, amount) {
            (Some(month0), Some(amount)) => {
                records.insert(month0 + 1, amount);
            }
            (None, Some(_)) => skipped.push(SkippedRow { row: row_idx, reason: SkipReason::UnresolvedMonth }),
            (Some(_), None) => skipped.push(SkippedRow { row: row_idx, reason: SkipReason::UnresolvedAmount }),
            (None, None) => skipped.push(SkippedRow { row: row_idx, reason: SkipReason::Unresolved }),
        }
    }

    if records.is_empty() {
        return Err(IngestError::NoValidRows);
    }
    Ok(Aggregation { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: HeaderLocation = HeaderLocation {
        row: 0,
        month_col: 0,
        amount_col: 1,
    };

    fn row(month: &str, amount: &str) -> Vec<Cell> {
        vec![Cell::from(month), Cell::from(amount)]
    }

    fn header_row() -> Vec<Cell> {
        row("Month", "Amount")
    }

    #[test]
    fn test_aggregate_last_write_wins() {
        let grid = vec![header_row(), row("March", "100"), row("mar", "150")];
        let agg = aggregate(&grid, &HEADER).unwrap();
        assert_eq!(agg.records.len(), 1);
        assert_eq!(agg.records.get(3), Some(150.0));
    }

    #[test]
    fn test_aggregate_bad_row_does_not_block_later_rows() {
        let grid = vec![header_row(), row("Jan", "oops"), row("Feb", "20")];
        let agg = aggregate(&grid, &HEADER).unwrap();
        assert_eq!(agg.records.get(1), None);
        assert_eq!(agg.records.get(2), Some(20.0));
        assert_eq!(
            agg.skipped,
            vec![SkippedRow { row: 1, reason: SkipReason::UnresolvedAmount }]
        );
    }

    #[test]
    fn test_aggregate_skip_reasons() {
        let grid = vec![
            header_row(),
            row("nope", "10"),
            row("nope", "-"),
            vec![Cell::text("Apr")],
            row("May", "5"),
        ];
        let agg = aggregate(&grid, &HEADER).unwrap();
        let reasons: Vec<SkipReason> = agg.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::UnresolvedMonth,
                SkipReason::Unresolved,
                SkipReason::UnresolvedAmount,
            ]
        );
    }

    #[test]
    fn test_aggregate_empty_rows_skipped_silently() {
        let grid = vec![header_row(), vec![], row("Jun", "1"), row("", "")];
        let agg = aggregate(&grid, &HEADER).unwrap();
        assert_eq!(agg.records.len(), 1);
        assert!(agg.skipped.is_empty());
    }

    #[test]
    fn test_aggregate_ignores_rows_above_header() {
        let header = HeaderLocation { row: 1, ..HEADER };
        let grid = vec![row("Jan", "999"), header_row(), row("Feb", "2")];
        let agg = aggregate(&grid, &header).unwrap();
        assert_eq!(agg.records.get(1), None);
        assert_eq!(agg.records.get(2), Some(2.0));
    }

    #[test]
    fn test_aggregate_no_valid_rows() {
        let grid = vec![header_row(), row("garbage", "N/A")];
        assert_eq!(aggregate(&grid, &HEADER).unwrap_err(), IngestError::NoValidRows);

        let only_header = vec![header_row()];
        assert_eq!(aggregate(&only_header, &HEADER).unwrap_err(), IngestError::NoValidRows);
    }
}
