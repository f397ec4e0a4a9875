//! Format-independent representation of a generated report.

use std::fmt;

/// A column of a tabular report.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub header: &'static str,
    /// Spreadsheet column width in characters
    pub width: f64,
}

impl Column {
    pub const fn new(header: &'static str, width: f64) -> Self {
        Self { header, width }
    }
}

/// A single cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Text cell, or [`Cell::Empty`] when there is no value.
    pub fn optional(value: Option<impl Into<String>>) -> Self {
        value.map_or(Self::Empty, |v| Self::Text(v.into()))
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl fmt::Display for Cell {
    /// Renders the value for text formats. Empty cells render as `N/A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Empty => f.write_str("N/A"),
        }
    }
}

/// A titled table with summary lines, rendered to PDF or a spreadsheet.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    /// Lines printed under the PDF title, e.g. the generation date and applied filters
    pub summary: Vec<String>,
    pub columns: Vec<Column>,
    /// Each row holds one cell per column
    pub rows: Vec<Vec<Cell>>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            summary: Vec::new(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn summary_line(mut self, line: impl Into<String>) -> Self {
        self.summary.push(line.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;

    /// Expect whole numbers without a fraction and empty cells as N/A
    #[test]
    fn cell_display() {
        assert_eq!(Cell::Number(8.0).to_string(), "8");
        assert_eq!(Cell::Number(7.5).to_string(), "7.5");
        assert_eq!(Cell::Empty.to_string(), "N/A");
        assert_eq!(Cell::optional(None::<String>), Cell::Empty);
    }
}
