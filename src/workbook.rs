use std::path::Path;

use calamine::{Data, Range, Reader};
use log::debug;

use crate::cell::{Cell, Grid};
use crate::error::{MonthbookError, Result};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load the first worksheet of a spreadsheet, or a CSV file, into a grid.
pub fn load_grid(file_path: &Path) -> Result<Grid> {
    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if ext == "csv" {
        load_csv(file_path)
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        load_first_sheet(file_path)
    } else {
        Err(MonthbookError::UnsupportedFormat(if ext.is_empty() {
            file_path.display().to_string()
        } else {
            ext
        }))
    }
}

fn load_first_sheet(file_path: &Path) -> Result<Grid> {
    let mut workbook = calamine::open_workbook_auto(file_path)?;
    if let Some(name) = workbook.sheet_names().first() {
        debug!("reading sheet {name:?} from {}", file_path.display());
    }
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(MonthbookError::EmptyWorkbook)??;
    Ok(range_to_grid(&range))
}

/// Materialize a worksheet range at its true sheet coordinates, so leading
/// blank rows and columns show up as absent cells.
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let mut grid: Grid = (0..start_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(Cell::from));
        grid.push(cells);
    }
    grid
}

fn load_csv(file_path: &Path) -> Result<Grid> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut grid = Grid::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(record.iter().map(Cell::from).collect());
    }
    debug!("read {} csv rows from {}", grid.len(), file_path.display());
    Ok(grid)
}
