//! CLI command handlers

pub mod commands;

pub use commands::{export, init_logging, RunReport};
