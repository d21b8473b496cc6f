//! Kotoshi Runner - headless front-end
//!
//! Drives a [`TimeEngine`](kotoshi_engine::TimeEngine) with the system clock
//! and prints the year's progress to a writer (normally stdout):
//!
//! - **Config**: JSON file + command-line overrides
//! - **Report**: text or JSON rendering of a snapshot
//! - **App**: clock selection, print loop and New Year logging

pub mod app;
pub mod config;
pub mod report;

// Re-export main types
pub use app::{build_clock, log_new_year, on_new_year, run};
pub use config::{Cli, OutputFormat, RunnerConfigFile, RunnerSettings};
pub use report::render;
