//! Sheet and cell types shared by the reader, classifier and writers

use std::borrow::Borrow;
use std::fmt;

/// Prefix joining a sheet name to its configuration unit
pub const UNIT_PREFIX: &str = "aci_";

/// A single spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Date/time already rendered as `YYYY-MM-DD HH:MM:SS`
    DateTime(String),
    /// Cell holding a spreadsheet error such as `#N/A`
    Error(String),
}

impl Cell {
    /// True for cells that carry no value (empty or errored)
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Empty | Cell::Error(_))
    }

    /// True when the cell holds a value whose trimmed text is non-empty.
    ///
    /// This is what makes a first-column cell count as a record key.
    pub fn has_content(&self) -> bool {
        !self.is_null() && !self.to_string().trim().is_empty()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty | Cell::Error(_) => Ok(()),
            Cell::Text(s) | Cell::DateTime(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

/// One worksheet: a header row plus the data rows below it.
///
/// Every row is padded to the header width by the reader, so `rows[r][0]`
/// is always the first spreadsheet column.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the widest row
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// First-column cells of the data rows, `None` where a row is shorter
    pub fn first_column(&self) -> impl Iterator<Item = Option<&Cell>> {
        self.rows.iter().map(|row| row.first())
    }
}

/// A deployable configuration unit, `aci_<sheet>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigUnit(String);

impl ConfigUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Unit derived from an exported sheet
    pub fn from_sheet(sheet_name: &str) -> Self {
        Self(format!("{}{}", UNIT_PREFIX, sheet_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the task file and tag for this unit (the sheet name)
    pub fn task_name(&self) -> &str {
        self.0.strip_prefix(UNIT_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ConfigUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ConfigUnit {
    fn borrow(&self) -> &str {
        &self.0
    }
}
