//! Runner configuration
//!
//! Settings come from an optional JSON file, then command-line flags
//! override individual values.

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use kotoshi_engine::{EngineConfig, EngineConfigFile, EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How each snapshot line is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "kotoshi", version, about = "How much of this year is left, live in the terminal")]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the file)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Stop after this many milliseconds instead of waiting for Ctrl-C
    #[arg(long = "for", value_name = "MS")]
    pub run_for_ms: Option<u64>,

    /// Engine tick interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Milliseconds between printed lines
    #[arg(long, value_name = "MS")]
    pub print_ms: Option<u64>,

    /// Let the clock start at this instant (RFC 3339), e.g. to watch New Year arrive
    #[arg(long, value_name = "RFC3339")]
    pub from: Option<DateTime<Utc>>,

    /// Print a single snapshot and exit
    #[arg(long)]
    pub once: bool,
}

/// Runner configuration (JSON representation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfigFile {
    #[serde(default)]
    pub engine: EngineConfigFile,
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default = "default_print_interval")]
    pub print_interval_ms: u64,
    #[serde(default)]
    pub run_for_ms: Option<u64>,
}

impl Default for RunnerConfigFile {
    fn default() -> Self {
        RunnerConfigFile {
            engine: EngineConfigFile::default(),
            output: OutputFormat::default(),
            print_interval_ms: default_print_interval(),
            run_for_ms: None,
        }
    }
}

impl RunnerConfigFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub engine: EngineConfig,
    pub output: OutputFormat,
    pub print_interval: Duration,
    pub run_for: Option<Duration>,
    pub start_at: Option<DateTime<Utc>>,
    pub once: bool,
}

impl RunnerSettings {
    /// Load the file named by `--config` (if any) and apply flag overrides
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => RunnerConfigFile::from_path(path)?,
            None => RunnerConfigFile::default(),
        };
        Self::from_parts(file, cli)
    }

    pub fn from_parts(mut file: RunnerConfigFile, cli: &Cli) -> Result<Self> {
        if let Some(tick_ms) = cli.tick_ms {
            file.engine.tick_interval_ms = tick_ms;
        }
        if let Some(print_ms) = cli.print_ms {
            file.print_interval_ms = print_ms;
        }
        if file.print_interval_ms == 0 {
            return Err(EngineError::Config(
                "print interval must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            engine: file.engine.to_engine_config()?,
            output: cli.output.unwrap_or(file.output),
            print_interval: Duration::from_millis(file.print_interval_ms),
            run_for: cli.run_for_ms.or(file.run_for_ms).map(Duration::from_millis),
            start_at: cli.from,
            once: cli.once,
        })
    }
}

fn default_print_interval() -> u64 {
    1000
}
