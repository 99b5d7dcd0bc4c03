use aci_fabric_export::cli;
use aci_fabric_export::config::{ExportConfig, DEFAULT_CSV_DIR, DEFAULT_MODULES_FILE};
use aci_fabric_export::error::ExportResult;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aci-export")]
#[command(about = "Export an ACI fabric spreadsheet to CSV files and an ordered Ansible playbook")]
#[command(long_about = "aci-export - ACI fabric spreadsheet → CSV + Ansible playbook

Every sheet whose first column holds at least one record is written to
<csv-dir>/<sheet>.csv and becomes the module aci_<sheet>. Navigation,
default and documentation sheets (Navigation, Sheet1-3, Template, Example,
README) are never exported.

The detected modules are listed in detected_modules_csv.yml and included,
in dependency-safe order, in <spreadsheet-name>.yml:
  pools/domains → interface policies → switch profiles → tenant objects
  → BGP policies → contracts → L3Out → route control

SAFETY:
  The spreadsheet argument is mandatory. There is no default input, so a
  stray invocation can never regenerate a deployment by accident.
  The CSV directory is wiped and recreated on every run.

EXAMPLES:
  aci-export fabric.xlsx
  aci-export fabric.xlsx --csv-dir build/csv --output-dir build
  RUST_LOG=aci_fabric_export=debug aci-export fabric.xlsx")]
#[command(version)]
struct Cli {
    /// Path to the fabric spreadsheet (.xlsx, .xlsm, .xls, .ods)
    spreadsheet: PathBuf,

    /// Directory receiving one CSV file per exported sheet (wiped first)
    #[arg(long, default_value = DEFAULT_CSV_DIR, env = "ACI_EXPORT_CSV_DIR")]
    csv_dir: PathBuf,

    /// Directory receiving the playbook and the module list
    #[arg(short, long, default_value = ".", env = "ACI_EXPORT_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Module list file name, relative to the output directory
    #[arg(long, default_value = DEFAULT_MODULES_FILE)]
    modules_file: PathBuf,

    /// Show classification decisions (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExportResult<()> {
    let args = Cli::parse();
    cli::init_logging(args.verbose);

    let config = ExportConfig {
        input: args.spreadsheet,
        csv_dir: args.csv_dir,
        output_dir: args.output_dir,
        modules_file: args.modules_file,
    };

    cli::export(&config)?;
    Ok(())
}
