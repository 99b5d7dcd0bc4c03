//! Run artifacts: per-sheet CSV files, the detected module list and the
//! deployment playbook

mod csv_writer;
mod module_list;
mod playbook;

pub use csv_writer::CsvExporter;
pub use module_list::{render_module_list, write_module_list};
pub use playbook::{playbook_path, DebugArgs, Play, PlayVars, PlaybookBuilder, StatArgs, Task};
