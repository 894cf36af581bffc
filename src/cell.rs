use calamine::{Data, DataType};
use chrono::NaiveDateTime;

/// One raw value from a worksheet position, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

/// Rows of cells as read from one worksheet. Rows may be ragged.
pub type Grid = Vec<Vec<Cell>>;

impl Cell {
    #[cfg(test)]
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }

    /// Text form used for header matching and string-based normalization.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Date(dt) => dt.format("%Y-%m-%d").to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_datetime() {
                Some(dt) => Cell::Date(dt),
                None => Cell::Text(data.to_string()),
            },
            Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

/// CSV fields are always text; an empty field is an absent cell.
impl From<&str> for Cell {
    fn from(field: &str) -> Self {
        if field.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }
}
