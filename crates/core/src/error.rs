//! Error types for the swatch core pipeline.

use thiserror::Error;

/// Errors produced by codec, cache, dictionary, and resolver operations.
#[derive(Debug, Error)]
pub enum SwatchError {
    /// A hex color string was not 3 or 6 hex digits after normalization.
    #[error("invalid hex color: {0}")]
    InvalidHexFormat(String),

    /// Saturation or lightness was outside 0..=100.
    #[error("invalid {name}: {value} is outside 0..=100")]
    InvalidParams { name: String, value: u32 },

    /// The remote resolver failed (connection, non-2xx status, or malformed body).
    #[error("network error: {0}")]
    Network(String),

    /// The durable cache store held data that could not be parsed.
    #[error("corrupt name cache: {0}")]
    CacheCorrupt(String),

    /// The name dictionary artifact could not be loaded or built.
    #[error("invalid dictionary: {0}")]
    Dictionary(String),

    /// A configuration file could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),

    /// An I/O failure reading or writing a file.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SwatchError {
    fn from(e: std::io::Error) -> Self {
        SwatchError::Io(e.to_string())
    }
}
