//! calamine-backed workbook reader

use super::SheetSource;
use crate::error::{ExportError, ExportResult};
use crate::types::{Cell, Sheet};
use calamine::{open_workbook_auto, Data, DataType, Range, Reader, Sheets};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Reads sheets from a workbook on disk
pub struct WorkbookReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    /// Open a workbook, detecting the format from its extension
    pub fn open<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path).map_err(|e| {
            ExportError::Workbook(format!("Failed to open '{}': {}", path.display(), e))
        })?;

        Ok(Self { path, workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for WorkbookReader {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    fn read_sheet(&mut self, name: &str) -> ExportResult<Sheet> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| ExportError::SheetRead {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(range_to_sheet(name, &range))
    }
}

/// Build a [`Sheet`] anchored at A1.
///
/// calamine ranges start at the first used cell, so positions are read
/// absolutely to keep column A as the first column even when it is blank.
/// Trailing blank rows are dropped.
fn range_to_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let Some((end_row, end_col)) = range.end() else {
        return Sheet::new(name, Vec::new(), Vec::new());
    };

    let row_at = |row: u32| -> Vec<Cell> {
        (0..=end_col)
            .map(|col| {
                range
                    .get_value((row, col))
                    .map(convert_cell)
                    .unwrap_or(Cell::Empty)
            })
            .collect()
    };

    let header = row_at(0);
    let mut rows: Vec<Vec<Cell>> = (1..=end_row)
        .map(|row| row_at(row).into_iter().map(missing_to_empty).collect())
        .collect();
    while rows
        .last()
        .is_some_and(|row| row.iter().all(|cell| *cell == Cell::Empty))
    {
        rows.pop();
    }

    Sheet::new(name, header, rows)
}

/// Text markers read as missing values in data rows (header cells keep them)
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn missing_to_empty(cell: Cell) -> Cell {
    match cell {
        Cell::Text(ref s) if NA_MARKERS.contains(&s.as_str()) => Cell::Empty,
        other => other,
    }
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) => match data.as_datetime() {
            Some(dt) => Cell::DateTime(format_datetime(&dt)),
            None => Cell::Text(data.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::DateTime(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
