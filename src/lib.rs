//! aci-fabric-export - ACI fabric spreadsheet → CSV files + Ansible playbook
//!
//! A fabric spreadsheet holds one sheet per ACI object type (VLAN pools,
//! tenants, EPGs, L3Outs...). This crate decides which sheets carry real
//! configuration, writes each of them as a CSV file, and emits a playbook
//! that deploys the matching modules in a dependency-safe order.
//!
//! # Example
//!
//! ```no_run
//! use aci_fabric_export::core::{export_sheets, order};
//! use aci_fabric_export::excel::WorkbookReader;
//! use aci_fabric_export::writer::CsvExporter;
//!
//! let mut reader = WorkbookReader::open("fabric.xlsx")?;
//! let exporter = CsvExporter::new("csv");
//! exporter.prepare()?;
//!
//! let summary = export_sheets(&mut reader, &exporter);
//! let plan = order(&summary.detected_units());
//!
//! println!("Exported: {}", summary.exported.len());
//! println!("Deploy order: {:?}", plan.unit_names());
//! # Ok::<(), aci_fabric_export::error::ExportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ExportError, ExportResult};
pub use types::{Cell, ConfigUnit, Sheet};
