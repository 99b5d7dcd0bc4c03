//! Spreadsheet access
//!
//! The rest of the crate only sees [`SheetSource`]: an ordered list of sheet
//! names and a way to read one sheet as a [`Sheet`](crate::types::Sheet).
//! [`WorkbookReader`] backs it with calamine (.xlsx, .xlsm, .xls, .ods).

mod reader;

pub use reader::WorkbookReader;

use crate::error::ExportResult;
use crate::types::Sheet;

/// Read access to the sheets of one spreadsheet
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet; header row first, data rows after
    fn read_sheet(&mut self, name: &str) -> ExportResult<Sheet>;
}
