//! Ansible playbook generation
//!
//! The playbook is one play against localhost: a banner and a readiness check
//! on the CSV directory, then one `include_tasks` step per planned unit in
//! plan order, then a summary. Task files live under `tasks/<task>.yml`.

use crate::core::DeploymentPlan;
use crate::error::ExportResult;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct Play {
    pub name: String,
    pub hosts: String,
    pub connection: String,
    pub gather_facts: bool,
    pub vars: PlayVars,
    pub pre_tasks: Vec<Task>,
    pub tasks: Vec<Task>,
    pub post_tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayVars {
    pub csv_dir: String,
    /// `present` deploys, anything else removes
    pub global_state: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Task {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<StatArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_when: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tasks: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugArgs {
    pub msg: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatArgs {
    pub path: String,
}

/// `<output_dir>/<source stem>.yml`
pub fn playbook_path(output_dir: &Path, source: &Path) -> PathBuf {
    output_dir.join(format!("{}.yml", source_stem(source)))
}

fn source_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "aci_deployment".to_string())
}

/// Builds the deployment playbook for one spreadsheet run
pub struct PlaybookBuilder<'a> {
    source: &'a Path,
    csv_dir: String,
    plan: &'a DeploymentPlan,
    detected_count: usize,
}

impl<'a> PlaybookBuilder<'a> {
    pub fn new(source: &'a Path, plan: &'a DeploymentPlan) -> Self {
        Self {
            source,
            csv_dir: "csv".to_string(),
            plan,
            detected_count: plan.len() + plan.unmapped.len(),
        }
    }

    /// CSV directory as seen from the playbook
    pub fn csv_dir(mut self, csv_dir: impl Into<String>) -> Self {
        self.csv_dir = csv_dir.into();
        self
    }

    pub fn build(&self) -> Play {
        let stem = source_stem(self.source);
        let file_name = self
            .source
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| stem.clone());

        Play {
            name: format!("ACI deployment from {}", file_name),
            hosts: "localhost".to_string(),
            connection: "local".to_string(),
            gather_facts: false,
            vars: PlayVars {
                csv_dir: self.csv_dir.clone(),
                global_state: "{{ deployment_state | default('present') }}".to_string(),
            },
            pre_tasks: vec![self.banner_task(&stem), readiness_task()],
            tasks: self.include_tasks(),
            post_tasks: vec![self.summary_task(&stem, &file_name)],
        }
    }

    pub fn render(&self) -> ExportResult<String> {
        let body = serde_yaml::to_string(&vec![self.build()])?;
        Ok(format!("---\n{}", body))
    }

    pub fn write(&self, path: &Path) -> ExportResult<()> {
        fs::write(path, self.render()?)?;
        Ok(())
    }

    fn banner_task(&self, stem: &str) -> Task {
        Task {
            name: "Show the requested action".to_string(),
            debug: Some(DebugArgs {
                msg: vec![
                    format!("=== ACI AUTOMATION - {} ===", stem.to_uppercase()),
                    "CSV directory: {{ csv_dir }}/".to_string(),
                    "ACI fabric: {{ aci_hostname }}".to_string(),
                    "Action: {% if global_state == 'present' %}DEPLOY{% else %}REMOVE{% endif %} ACI objects"
                        .to_string(),
                    format!("Detected modules: {}", self.detected_count),
                ],
            }),
            ..Default::default()
        }
    }

    fn include_tasks(&self) -> Vec<Task> {
        self.plan
            .steps()
            .map(|step| {
                let task = step.unit.task_name();
                Task {
                    name: format!("Include tasks for {}", step.description),
                    include_tasks: Some(format!("tasks/{}.yml", task)),
                    tags: vec![task.to_string(), step.unit.to_string()],
                    ..Default::default()
                }
            })
            .collect()
    }

    fn summary_task(&self, stem: &str, file_name: &str) -> Task {
        let mut msg = vec![
            format!("ACI deployment from {} finished", file_name),
            format!("Modules processed: {}", self.plan.unit_names().join(", ")),
            format!("Total modules: {}", self.plan.len()),
            format!("Detected modules: {}", self.detected_count),
        ];
        if !self.plan.unmapped.is_empty() {
            let unmapped: Vec<&str> = self.plan.unmapped.iter().map(|u| u.as_str()).collect();
            msg.push(format!(
                "Not deployed (no deployment position): {}",
                unmapped.join(", ")
            ));
        }
        msg.push("Source: CSV files in {{ csv_dir }}/".to_string());

        Task {
            name: format!("Deployment summary for {}", stem),
            debug: Some(DebugArgs { msg }),
            ..Default::default()
        }
    }
}

fn readiness_task() -> Task {
    Task {
        name: "Check that the CSV directory exists".to_string(),
        stat: Some(StatArgs {
            path: "{{ csv_dir }}".to_string(),
        }),
        register: Some("csv_dir_stat".to_string()),
        failed_when: Some(
            "not csv_dir_stat.stat.exists or not csv_dir_stat.stat.isdir".to_string(),
        ),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order;
    use crate::types::ConfigUnit;
    use pretty_assertions::assert_eq;
    use serde_yaml::Value;
    use std::collections::BTreeSet;

    fn plan(names: &[&str]) -> DeploymentPlan {
        let detected: BTreeSet<ConfigUnit> = names.iter().map(|n| ConfigUnit::new(*n)).collect();
        order(&detected)
    }

    #[test]
    fn test_playbook_path() {
        assert_eq!(
            playbook_path(Path::new("out"), Path::new("/data/fabric_a.xlsx")),
            PathBuf::from("out/fabric_a.yml")
        );
    }

    #[test]
    fn test_include_steps_in_plan_order() {
        let plan = plan(&["aci_epg", "aci_tenant", "aci_vlan_pool"]);
        let play = PlaybookBuilder::new(Path::new("fabric.xlsx"), &plan).build();

        let includes: Vec<&str> = play
            .tasks
            .iter()
            .filter_map(|t| t.include_tasks.as_deref())
            .collect();
        assert_eq!(
            includes,
            vec![
                "tasks/vlan_pool.yml",
                "tasks/tenant.yml",
                "tasks/epg.yml"
            ]
        );
        assert_eq!(play.tasks[0].name, "Include tasks for VLAN Pools");
        assert_eq!(play.tasks[0].tags, vec!["vlan_pool", "aci_vlan_pool"]);
    }

    #[test]
    fn test_render_is_valid_yaml() {
        let plan = plan(&["aci_tenant", "aci_vrf"]);
        let yaml = PlaybookBuilder::new(Path::new("lab.xlsx"), &plan)
            .csv_dir("exports")
            .render()
            .unwrap();

        assert!(yaml.starts_with("---\n"));
        let doc: Value = serde_yaml::from_str(&yaml).unwrap();
        let play = &doc[0];

        assert_eq!(play["hosts"], Value::from("localhost"));
        assert_eq!(play["gather_facts"], Value::from(false));
        assert_eq!(play["vars"]["csv_dir"], Value::from("exports"));
        assert_eq!(
            play["vars"]["global_state"],
            Value::from("{{ deployment_state | default('present') }}")
        );
        assert_eq!(
            play["pre_tasks"][1]["register"],
            Value::from("csv_dir_stat")
        );
        assert_eq!(
            play["tasks"][1]["include_tasks"],
            Value::from("tasks/vrf.yml")
        );
        assert!(play["tasks"][0].get("debug").is_none());
        assert_eq!(
            play["post_tasks"][0]["debug"]["msg"][1],
            Value::from("Modules processed: aci_tenant, aci_vrf")
        );
    }

    #[test]
    fn test_empty_plan_has_no_include_steps() {
        let plan = DeploymentPlan::default();
        let play = PlaybookBuilder::new(Path::new("empty.xlsx"), &plan).build();

        assert!(play.tasks.is_empty());
        assert_eq!(play.pre_tasks.len(), 2);
        assert_eq!(play.post_tasks.len(), 1);
    }

    #[test]
    fn test_banner_counts_unmapped_units() {
        let plan = plan(&["aci_tenant", "aci_custom_sheet"]);
        let play = PlaybookBuilder::new(Path::new("fabric.xlsx"), &plan).build();

        let msg = &play.pre_tasks[0].debug.as_ref().unwrap().msg;
        assert_eq!(msg[0], "=== ACI AUTOMATION - FABRIC ===");
        assert_eq!(msg[4], "Detected modules: 2");
        assert_eq!(play.tasks.len(), 1);
    }

    #[test]
    fn test_summary_lists_unmapped_units() {
        let plan = plan(&["aci_tenant", "aci_custom_sheet", "aci_vrf"]);
        let play = PlaybookBuilder::new(Path::new("fabric.xlsx"), &plan).build();

        let msg = &play.post_tasks[0].debug.as_ref().unwrap().msg;
        assert_eq!(msg[1], "Modules processed: aci_tenant, aci_vrf");
        assert_eq!(msg[2], "Total modules: 2");
        assert_eq!(msg[3], "Detected modules: 3");
        assert_eq!(
            msg[4],
            "Not deployed (no deployment position): aci_custom_sheet"
        );
    }

    #[test]
    fn test_summary_without_unmapped_units() {
        let plan = plan(&["aci_tenant"]);
        let play = PlaybookBuilder::new(Path::new("fabric.xlsx"), &plan).build();

        let msg = &play.post_tasks[0].debug.as_ref().unwrap().msg;
        assert_eq!(msg.len(), 5);
        assert!(!msg.iter().any(|line| line.starts_with("Not deployed")));
    }
}
