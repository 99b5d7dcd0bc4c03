use crate::error::ExportResult;
use crate::types::ConfigUnit;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct DetectedModules<'a> {
    detected_modules: Vec<&'a str>,
}

/// Render the sorted list of detected units as YAML
pub fn render_module_list(detected: &BTreeSet<ConfigUnit>) -> ExportResult<String> {
    let list = DetectedModules {
        detected_modules: detected.iter().map(ConfigUnit::as_str).collect(),
    };

    let mut out = String::from(
        "# ACI modules detected from the exported CSV files\n\
         # Generated by aci-export\n",
    );
    out.push_str(&serde_yaml::to_string(&list)?);
    Ok(out)
}

pub fn write_module_list(path: &Path, detected: &BTreeSet<ConfigUnit>) -> ExportResult<()> {
    fs::write(path, render_module_list(detected)?)?;
    Ok(())
}
