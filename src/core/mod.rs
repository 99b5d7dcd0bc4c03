//! Core decision logic: sheet classification and deployment ordering

pub mod classifier;
pub mod orderer;
pub mod pipeline;
pub mod precedence;

pub use classifier::{
    classify, inspect, is_system_sheet, Classification, SheetOutcome, SkipReason, IGNORED_SHEETS,
};
pub use orderer::{order, DeploymentPlan, PlanStep};
pub use pipeline::{export_sheets, ExportSummary, ExportedSheet, FailedSheet, SkippedSheet};
pub use precedence::{describe, phase_of, Phase, PRECEDENCE};
