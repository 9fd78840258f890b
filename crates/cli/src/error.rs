//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: pipeline error (remote lookup failed, bad dictionary)
//! - 11: I/O error (config, dictionary, or cache file)
//! - 12: input error (bad hex, saturation/lightness out of range, bad config)
//! - 13: serialization error

use std::fmt;
use swatch_core::SwatchError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A pipeline error (remote lookup, dictionary, cache).
    Pipeline(SwatchError),
    /// An I/O error (reading or writing a file).
    Io(String),
    /// A user input error (bad hex, out-of-range params, bad config).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Pipeline(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Pipeline(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<SwatchError> for CliError {
    fn from(e: SwatchError) -> Self {
        match e {
            SwatchError::Io(msg) => CliError::Io(msg),
            e @ (SwatchError::InvalidHexFormat(_)
            | SwatchError::InvalidParams { .. }
            | SwatchError::Config(_)) => CliError::Input(e.to_string()),
            other => CliError::Pipeline(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
