//! Classify-then-export pass over every sheet of a source

use super::classifier::{inspect, SheetOutcome, SkipReason};
use crate::excel::SheetSource;
use crate::types::ConfigUnit;
use crate::writer::CsvExporter;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedSheet {
    pub name: String,
    pub unit: ConfigUnit,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSheet {
    pub name: String,
    pub reason: SkipReason,
}

/// A sheet that classified as exportable but could not be written
#[derive(Debug, Clone, PartialEq)]
pub struct FailedSheet {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    pub sheet_count: usize,
    pub exported: Vec<ExportedSheet>,
    pub skipped: Vec<SkippedSheet>,
    pub failed: Vec<FailedSheet>,
}

impl ExportSummary {
    /// Units of the sheets that were actually written
    pub fn detected_units(&self) -> BTreeSet<ConfigUnit> {
        self.exported.iter().map(|s| s.unit.clone()).collect()
    }
}

/// Classify every sheet of `source` in workbook order and write the
/// exportable ones. Per-sheet failures are recorded, never returned.
pub fn export_sheets<S: SheetSource>(source: &mut S, exporter: &CsvExporter) -> ExportSummary {
    let names = source.sheet_names();
    let mut summary = ExportSummary {
        sheet_count: names.len(),
        ..Default::default()
    };

    for name in names {
        let sheet = match inspect(source, &name) {
            SheetOutcome::Export(sheet) => sheet,
            SheetOutcome::Skip { name, reason } => {
                summary.skipped.push(SkippedSheet { name, reason });
                continue;
            }
        };

        match exporter.write_sheet(&sheet) {
            Ok(path) => {
                let unit = ConfigUnit::from_sheet(&sheet.name);
                tracing::info!(sheet = %sheet.name, unit = %unit, path = %path.display(), "exported sheet");
                summary.exported.push(ExportedSheet {
                    unit,
                    path,
                    rows: sheet.row_count(),
                    columns: sheet.column_count(),
                    name: sheet.name,
                });
            }
            Err(e) => {
                tracing::warn!(sheet = %sheet.name, error = %e, "failed to export sheet");
                summary.failed.push(FailedSheet {
                    name: sheet.name,
                    error: e.to_string(),
                });
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order;
    use crate::error::{ExportError, ExportResult};
    use crate::types::{Cell, Sheet};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Sheets in insertion order; `None` marks an unreadable sheet
    struct MemoryWorkbook {
        sheets: Vec<(String, Option<Sheet>)>,
    }

    impl MemoryWorkbook {
        fn new() -> Self {
            Self { sheets: Vec::new() }
        }

        fn with(mut self, name: &str, header: &[&str], first_column: &[&str]) -> Self {
            let header = header.iter().map(|h| Cell::from(*h)).collect();
            let rows = first_column
                .iter()
                .map(|v| vec![Cell::from(*v), Cell::from("x")])
                .collect();
            self.sheets
                .push((name.to_string(), Some(Sheet::new(name, header, rows))));
            self
        }

        fn broken(mut self, name: &str) -> Self {
            self.sheets.push((name.to_string(), None));
            self
        }
    }

    impl SheetSource for MemoryWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            self.sheets.iter().map(|(name, _)| name.clone()).collect()
        }

        fn read_sheet(&mut self, name: &str) -> ExportResult<Sheet> {
            self.sheets
                .iter()
                .find(|(n, _)| n == name)
                .and_then(|(_, sheet)| sheet.clone())
                .ok_or_else(|| ExportError::SheetRead {
                    sheet: name.to_string(),
                    message: "unreadable".to_string(),
                })
        }
    }

    #[test]
    fn test_navigation_vlan_pool_domain_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp_dir.path());
        let mut source = MemoryWorkbook::new()
            .with("Navigation", &["Sheet", "Link"], &["vlan_pool", "domain"])
            .with("vlan_pool", &["name", "alloc_mode"], &["pool-a", "pool-b"])
            .with("domain", &["name", "pool"], &[]);

        let summary = export_sheets(&mut source, &exporter);

        assert_eq!(summary.sheet_count, 3);
        let exported: Vec<&str> = summary.exported.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(exported, vec!["vlan_pool"]);
        assert_eq!(
            summary.skipped,
            vec![
                SkippedSheet {
                    name: "Navigation".to_string(),
                    reason: SkipReason::SystemSheet
                },
                SkippedSheet {
                    name: "domain".to_string(),
                    reason: SkipReason::Empty
                },
            ]
        );

        let detected = summary.detected_units();
        assert_eq!(
            detected.iter().map(ConfigUnit::as_str).collect::<Vec<_>>(),
            vec!["aci_vlan_pool"]
        );
        assert_eq!(order(&detected).unit_names(), vec!["aci_vlan_pool"]);
        assert!(temp_dir.path().join("vlan_pool.csv").exists());
        assert!(!temp_dir.path().join("domain.csv").exists());
    }

    #[test]
    fn test_read_error_does_not_stop_run() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp_dir.path());
        let mut source = MemoryWorkbook::new()
            .broken("bd")
            .with("tenant", &["name"], &["common"]);

        let summary = export_sheets(&mut source, &exporter);

        assert_eq!(summary.exported.len(), 1);
        assert_eq!(summary.exported[0].unit, ConfigUnit::new("aci_tenant"));
        assert_eq!(summary.exported[0].rows, 1);
        assert_eq!(summary.exported[0].columns, 2);
        assert!(matches!(
            summary.skipped[0].reason,
            SkipReason::ReadError(_)
        ));
    }

    #[test]
    fn test_write_failure_is_not_detected() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp_dir.path().join("not-created"));
        let mut source = MemoryWorkbook::new().with("vrf", &["name"], &["v1"]);

        let summary = export_sheets(&mut source, &exporter);

        assert!(summary.exported.is_empty());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].name, "vrf");
        assert!(summary.detected_units().is_empty());
    }
}
