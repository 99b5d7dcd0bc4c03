//! Run configuration

use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_DIR: &str = "csv";
pub const DEFAULT_MODULES_FILE: &str = "detected_modules_csv.yml";

/// Where one export run reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Spreadsheet to export. There is no default.
    pub input: PathBuf,
    pub csv_dir: PathBuf,
    /// Directory for the playbook and the module list
    pub output_dir: PathBuf,
    /// Module list file name, relative to `output_dir`
    pub modules_file: PathBuf,
}

impl ExportConfig {
    pub fn new<P: AsRef<Path>>(input: P) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            output_dir: PathBuf::from("."),
            modules_file: PathBuf::from(DEFAULT_MODULES_FILE),
        }
    }

    pub fn modules_path(&self) -> PathBuf {
        self.output_dir.join(&self.modules_file)
    }
}
