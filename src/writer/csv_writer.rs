//! Sheet → CSV export

use crate::error::ExportResult;
use crate::types::{Cell, Sheet};
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes exportable sheets as `<dir>/<sheet>.csv`
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove the output directory and recreate it empty
    pub fn prepare(&self) -> ExportResult<()> {
        if self.dir.exists() {
            tracing::info!(dir = %self.dir.display(), "cleaning CSV directory");
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn path_for(&self, sheet_name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet_name))
    }

    /// Write the header and every data row of `sheet`
    pub fn write_sheet(&self, sheet: &Sheet) -> ExportResult<PathBuf> {
        let path = self.path_for(&sheet.name);
        let width = sheet.column_count();

        let mut wtr = WriterBuilder::new().from_path(&path)?;
        wtr.write_record(header_record(&sheet.header, width))?;
        for row in &sheet.rows {
            wtr.write_record(data_record(row, width))?;
        }
        wtr.flush()?;

        Ok(path)
    }
}

/// Blank header cells get a positional name so every column stays addressable
fn header_record(header: &[Cell], width: usize) -> Vec<String> {
    (0..width)
        .map(|idx| match header.get(idx) {
            Some(cell) if cell.has_content() => cell.to_string(),
            _ => format!("Unnamed: {}", idx),
        })
        .collect()
}

fn data_record(row: &[Cell], width: usize) -> Vec<String> {
    (0..width)
        .map(|idx| row.get(idx).map(ToString::to_string).unwrap_or_default())
        .collect()
}
