//! Remote name resolution over HTTP.
//!
//! The resolver is a pure query: it never caches. The generator decides
//! what to do with the result.

use crate::color::HexColor;
use crate::error::SwatchError;
use serde::Deserialize;
use std::time::Duration;

/// Default lookup endpoint; queried as `GET <endpoint>?hex=<rrggbb>`.
pub const DEFAULT_ENDPOINT: &str = "https://www.thecolorapi.com/id";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A name and display RGB string returned by a remote lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    /// Pre-formatted by the remote side, e.g. `rgb(255, 0, 0)`.
    pub rgb: String,
}

/// Maps a hex color to a name when neither the dictionary nor the cache can.
pub trait NameResolver: Send + Sync {
    /// Returns `SwatchError::Network` on any failure.
    fn resolve(&self, hex: &HexColor) -> Result<Resolution, SwatchError>;
}

#[derive(Deserialize)]
struct ApiValue {
    value: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    name: ApiValue,
    rgb: ApiValue,
}

/// Extracts `name.value` and `rgb.value` from a response body.
///
/// Extra fields are ignored. Anything else is `SwatchError::Network`.
pub fn parse_response(body: &str) -> Result<Resolution, SwatchError> {
    let parsed: ApiResponse = serde_json::from_str(body)
        .map_err(|e| SwatchError::Network(format!("malformed response body: {e}")))?;
    Ok(Resolution {
        name: parsed.name.value,
        rgb: parsed.rgb.value,
    })
}

/// Resolver backed by a color-naming HTTP API.
pub struct ColorApiResolver {
    agent: ureq::Agent,
    endpoint: String,
}

impl ColorApiResolver {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for ColorApiResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }
}

impl NameResolver for ColorApiResolver {
    fn resolve(&self, hex: &HexColor) -> Result<Resolution, SwatchError> {
        log::debug!("resolving {hex} via {}", self.endpoint);
        let response = self
            .agent
            .get(&self.endpoint)
            .query("hex", &hex.to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    SwatchError::Network(format!("{hex}: HTTP status {code}"))
                }
                ureq::Error::Transport(t) => SwatchError::Network(format!("{hex}: {t}")),
            })?;
        // ureq only errors on 4xx/5xx; a 3xx it does not follow arrives here.
        if !(200..300).contains(&response.status()) {
            return Err(SwatchError::Network(format!(
                "{hex}: HTTP status {}",
                response.status()
            )));
        }
        let body = response
            .into_string()
            .map_err(|e| SwatchError::Network(format!("{hex}: {e}")))?;
        parse_response(&body)
    }
}
