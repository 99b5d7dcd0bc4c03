//! Sheet classification: which sheets hold exportable configuration data
//!
//! The first column of a configuration sheet holds the key of each record.
//! A sheet without a single keyed row is structurally empty, whatever else
//! it contains (headers, formatting, notes in other columns).

use crate::excel::SheetSource;
use crate::types::{Cell, Sheet};
use std::fmt;

/// Navigation, default and documentation sheets. Never exported.
pub const IGNORED_SHEETS: &[&str] = &[
    "Navigation",
    "Sheet1",
    "Sheet2",
    "Sheet3",
    "Template",
    "Example",
    "README",
];

/// Why a sheet was not exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    SystemSheet,
    Empty,
    NoKeyedRows,
    ReadError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SystemSheet => f.write_str("system sheet"),
            SkipReason::Empty => f.write_str("empty"),
            SkipReason::NoKeyedRows => f.write_str("no data"),
            SkipReason::ReadError(msg) => write!(f, "read error: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Export,
    Skip(SkipReason),
}

impl Classification {
    pub fn is_export(&self) -> bool {
        matches!(self, Classification::Export)
    }
}

/// Result of inspecting one sheet of a source
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome {
    Export(Sheet),
    Skip { name: String, reason: SkipReason },
}

pub fn is_system_sheet(name: &str) -> bool {
    IGNORED_SHEETS.contains(&name)
}

/// Classify an already-read sheet
pub fn classify(sheet: &Sheet) -> Classification {
    if is_system_sheet(&sheet.name) {
        return Classification::Skip(SkipReason::SystemSheet);
    }

    if sheet.rows.is_empty() {
        return Classification::Skip(SkipReason::Empty);
    }

    let keyed = |cell: Option<&Cell>| cell.is_some_and(|c| c.has_content());

    let has_data = if sheet.rows.len() == 1 {
        // Single row: nothing to tell header from data, judge the one cell
        keyed(sheet.rows[0].first())
    } else {
        // Row 0 is the sub-header; records start at row 1
        sheet.first_column().skip(1).any(keyed)
    };

    if has_data {
        Classification::Export
    } else {
        Classification::Skip(SkipReason::NoKeyedRows)
    }
}

/// Classify one sheet of `source` by name.
///
/// Ignored sheets are never read. A read failure becomes a skip so that one
/// broken sheet does not stop the others.
pub fn inspect<S: SheetSource>(source: &mut S, name: &str) -> SheetOutcome {
    if is_system_sheet(name) {
        tracing::debug!(sheet = name, "skipping system sheet");
        return SheetOutcome::Skip {
            name: name.to_string(),
            reason: SkipReason::SystemSheet,
        };
    }

    let sheet = match source.read_sheet(name) {
        Ok(sheet) => sheet,
        Err(e) => {
            tracing::warn!(sheet = name, error = %e, "sheet could not be read, skipping");
            return SheetOutcome::Skip {
                name: name.to_string(),
                reason: SkipReason::ReadError(e.to_string()),
            };
        }
    };

    match classify(&sheet) {
        Classification::Export => {
            tracing::debug!(sheet = name, rows = sheet.row_count(), "sheet has data");
            SheetOutcome::Export(sheet)
        }
        Classification::Skip(reason) => {
            tracing::debug!(sheet = name, %reason, "skipping sheet");
            SheetOutcome::Skip {
                name: name.to_string(),
                reason,
            }
        }
    }
}
