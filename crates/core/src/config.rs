//! Pipeline configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides. Front ends layer their own flags on top.

use crate::error::SwatchError;
use crate::resolver::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the durable name cache.
const CACHE_FILE_NAME: &str = "color-name-cache.json";

/// Settings for building a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote resolver endpoint, queried with `?hex=rrggbb`.
    pub endpoint: String,
    /// Per-request timeout for the remote resolver.
    pub timeout_secs: u64,
    /// Where the durable name cache lives.
    pub cache_path: PathBuf,
    /// Dictionary artifact to load instead of the built-in one.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cache_path: default_cache_path(),
            dictionary_path: None,
        }
    }
}

impl Config {
    /// Parses a JSON config.
    pub fn from_json(json: &str) -> Result<Self, SwatchError> {
        serde_json::from_str(json).map_err(|e| SwatchError::Config(e.to_string()))
    }

    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self, SwatchError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `$HOME/.config/swatch/color-name-cache.json`, or the temp dir without `HOME`.
pub fn default_cache_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("swatch")
            .join(CACHE_FILE_NAME);
    }
    std::env::temp_dir().join("swatch").join(CACHE_FILE_NAME)
}
