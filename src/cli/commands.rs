use crate::config::ExportConfig;
use crate::core::{export_sheets, order, DeploymentPlan, ExportSummary, SkipReason};
use crate::error::{ExportError, ExportResult};
use crate::excel::{SheetSource, WorkbookReader};
use crate::writer::{playbook_path, write_module_list, CsvExporter, PlaybookBuilder};
use colored::Colorize;
use std::fs;
use std::env;
use std::path::{Component, Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// What one export run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: ExportSummary,
    pub plan: DeploymentPlan,
    pub modules_file: PathBuf,
    pub playbook: PathBuf,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "aci_fabric_export=debug"
    } else {
        "aci_fabric_export=info"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// The input must be an existing file; nothing is written otherwise
fn validate_input(input: &Path) -> ExportResult<()> {
    if !input.exists() {
        return Err(ExportError::Input(format!(
            "Spreadsheet not found: {}",
            input.display()
        )));
    }
    if !input.is_file() {
        return Err(ExportError::Input(format!(
            "Not a spreadsheet file: {}",
            input.display()
        )));
    }
    Ok(())
}

/// Absolute, symlink-free form of `path`, which need not exist yet.
///
/// The deepest existing ancestor is canonicalized and the remaining
/// components are applied lexically.
fn resolve_path(path: &Path) -> ExportResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let components: Vec<Component> = absolute.components().collect();
    let mut split = components.len();
    let mut existing: PathBuf = components.iter().collect();
    while split > 1 && !existing.exists() {
        split -= 1;
        existing = components[..split].iter().collect();
    }

    let mut resolved = existing.canonicalize()?;
    for component in &components[split..] {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// The CSV directory is wiped on every run: refuse any location whose removal
/// would take the spreadsheet, the output directory or the working directory
/// with it.
fn validate_csv_dir(config: &ExportConfig) -> ExportResult<()> {
    let csv_dir = resolve_path(&config.csv_dir)?;
    let input = resolve_path(&config.input)?;
    let output_dir = resolve_path(&config.output_dir)?;
    let cwd = resolve_path(Path::new("."))?;

    let conflict = if input.starts_with(&csv_dir) {
        Some("contains the spreadsheet")
    } else if output_dir.starts_with(&csv_dir) {
        Some("contains the output directory")
    } else if cwd.starts_with(&csv_dir) {
        Some("contains the current directory")
    } else {
        None
    };

    match conflict {
        Some(what) => Err(ExportError::Input(format!(
            "Refusing to use {} as CSV directory: it is wiped before export and {}",
            config.csv_dir.display(),
            what
        ))),
        None => Ok(()),
    }
}

/// `csv_dir` as written into the playbook: relative to the playbook
/// directory when it lives below it, absolute otherwise
fn playbook_csv_dir(csv_dir: &Path, output_dir: &Path) -> ExportResult<String> {
    let csv_dir = resolve_path(csv_dir)?;
    let output_dir = resolve_path(output_dir)?;

    let path = match csv_dir.strip_prefix(&output_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => csv_dir,
    };
    Ok(path.to_string_lossy().into_owned())
}

/// Execute the export: CSV files, module list and playbook
pub fn export(config: &ExportConfig) -> ExportResult<RunReport> {
    println!("{}", "🎯 ACI Export - Excel → CSV + playbook".bold().green());
    println!("   Input: {}\n", config.input.display());

    validate_input(&config.input)?;
    validate_csv_dir(config)?;
    let mut reader = WorkbookReader::open(&config.input)?;
    println!("   Workbook: {}", reader.path().display());

    let exporter = CsvExporter::new(&config.csv_dir);
    exporter.prepare()?;
    println!("   CSV directory: {}", exporter.dir().display());
    println!("   {} sheets found\n", reader.sheet_names().len());

    let summary = export_sheets(&mut reader, &exporter);
    print_sheets(&summary);

    let detected = summary.detected_units();
    fs::create_dir_all(&config.output_dir)?;
    let modules_file = config.modules_path();
    write_module_list(&modules_file, &detected)?;

    let plan = order(&detected);
    let playbook = playbook_path(&config.output_dir, &config.input);
    PlaybookBuilder::new(&config.input, &plan)
        .csv_dir(playbook_csv_dir(&config.csv_dir, &config.output_dir)?)
        .write(&playbook)?;

    print_summary(&summary, &plan, &modules_file, &playbook);

    Ok(RunReport {
        summary,
        plan,
        modules_file,
        playbook,
    })
}

fn print_sheets(summary: &ExportSummary) {
    for sheet in &summary.exported {
        let file_name = format!("{}.csv", sheet.name);
        println!(
            "   ✅ {:<35} → {:<40} ({}x{}) → {}",
            sheet.name,
            file_name,
            sheet.rows,
            sheet.columns,
            sheet.unit.to_string().cyan()
        );
    }

    for sheet in &summary.skipped {
        let reason = match &sheet.reason {
            SkipReason::ReadError(_) => sheet.reason.to_string().red(),
            _ => sheet.reason.to_string().yellow(),
        };
        println!("   ⏭️  {:<35} → skipped ({})", sheet.name, reason);
    }

    for sheet in &summary.failed {
        println!(
            "   ❌ {:<35} → {}",
            sheet.name,
            format!("export failed: {}", sheet.error).red()
        );
    }
}

fn print_summary(
    summary: &ExportSummary,
    plan: &DeploymentPlan,
    modules_file: &Path,
    playbook: &Path,
) {
    println!();
    println!("{}", "📊 Export summary".bold().green());
    println!("   Sheets exported: {}", summary.exported.len());
    println!("   Sheets skipped:  {}", summary.skipped.len());
    if !summary.failed.is_empty() {
        println!(
            "   {}",
            format!("Export failures: {}", summary.failed.len()).red()
        );
    }
    println!("   Module list:     {}", modules_file.display());
    println!("   Playbook:        {}", playbook.display().to_string().bold());

    if !plan.unmapped.is_empty() {
        println!(
            "\n   {}",
            "⚠️  Not in the deployment order, left out of the playbook:".yellow()
        );
        for unit in &plan.unmapped {
            println!("      • {}", unit);
        }
    }

    println!("\n   {} modules in deployment order:", plan.len());
    for step in plan.steps() {
        println!(
            "      {} {}",
            format!("[{}]", step.phase).dimmed(),
            step.unit.as_str().bright_blue()
        );
    }
    println!();
}
