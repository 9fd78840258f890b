//! Saturation/lightness controls for a generation run.

use crate::error::SwatchError;
use serde::Serialize;

/// Upper bound for both controls.
pub const MAX_PERCENT: u32 = 100;

/// The two user-facing controls, each an integer percentage in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SwatchParams {
    saturation: u8,
    lightness: u8,
}

impl SwatchParams {
    /// Validates both percentages.
    ///
    /// Returns `SwatchError::InvalidParams` naming the first value above 100.
    pub fn new(saturation: u32, lightness: u32) -> Result<Self, SwatchError> {
        Ok(Self {
            saturation: percent("saturation", saturation)?,
            lightness: percent("lightness", lightness)?,
        })
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    /// Saturation and lightness as fractions in [0, 1].
    pub fn fractions(&self) -> (f64, f64) {
        (
            f64::from(self.saturation) / 100.0,
            f64::from(self.lightness) / 100.0,
        )
    }
}

fn percent(name: &str, value: u32) -> Result<u8, SwatchError> {
    if value > MAX_PERCENT {
        return Err(SwatchError::InvalidParams {
            name: name.to_string(),
            value,
        });
    }
    Ok(value as u8)
}
