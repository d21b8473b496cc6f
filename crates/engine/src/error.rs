//! Error types for the engine crate

use thiserror::Error;

/// Errors raised while setting the engine up
///
/// Running an engine never fails; only loading and validating its
/// configuration can.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
