use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::IngestError;

pub const DEFAULT_SCAN_ROWS: usize = 30;

/// Column labels that identify the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderVocabulary {
    #[serde(default = "default_month_labels")]
    pub month_labels: BTreeSet<String>,
    #[serde(default = "default_amount_labels")]
    pub amount_labels: BTreeSet<String>,
    /// Only this many leading rows are searched for the header.
    #[serde(default = "default_scan_rows")]
    pub scan_rows: usize,
}

fn default_month_labels() -> BTreeSet<String> {
    ["month", "months"].iter().map(|s| s.to_string()).collect()
}

fn default_amount_labels() -> BTreeSet<String> {
    ["amount", "value", "amt"].iter().map(|s| s.to_string()).collect()
}

fn default_scan_rows() -> usize {
    DEFAULT_SCAN_ROWS
}

impl Default for HeaderVocabulary {
    fn default() -> Self {
        Self {
            month_labels: default_month_labels(),
            amount_labels: default_amount_labels(),
            scan_rows: default_scan_rows(),
        }
    }
}

impl HeaderVocabulary {
    fn matches(labels: &BTreeSet<String>, normalized: &str) -> bool {
        !normalized.is_empty() && labels.iter().any(|l| normalize_label(l) == normalized)
    }

    pub fn is_month_label(&self, normalized: &str) -> bool {
        Self::matches(&self.month_labels, normalized)
    }

    pub fn is_amount_label(&self, normalized: &str) -> bool {
        Self::matches(&self.amount_labels, normalized)
    }
}

/// Lower-case with every whitespace character removed: " Total  Amt " -> "totalamt".
pub fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Position of the header row and its two columns, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    pub row: usize,
    pub month_col: usize,
    pub amount_col: usize,
}

/// Find the first row, within the scan window, that names both a month column
/// and an amount column.
pub fn locate_header(
    grid: &[Vec<Cell>],
    vocabulary: &HeaderVocabulary,
) -> Result<HeaderLocation, IngestError> {
    for (row_idx, row) in grid.iter().take(vocabulary.scan_rows).enumerate() {
        let mut month_col = None;
        let mut amount_col = None;
        for (col_idx, cell) in row.iter().enumerate() {
            let label = normalize_label(&cell.to_text());
            if month_col.is_none() && vocabulary.is_month_label(&label) {
                month_col = Some(col_idx);
            }
            if amount_col.is_none() && vocabulary.is_amount_label(&label) {
                amount_col = Some(col_idx);
            }
        }
        if let (Some(month_col), Some(amount_col)) = (month_col, amount_col) {
            return Ok(HeaderLocation {
                row: row_idx,
                month_col,
                amount_col,
            });
        }
    }
    Err(IngestError::HeaderNotFound {
        scanned: grid.len().min(vocabulary.scan_rows),
    })
}
