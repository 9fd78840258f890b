//! Color codec: HSL to hex conversion and hex to RGB decoding.
//!
//! [`HexColor`] is the canonical lookup key for every tier of name
//! resolution. It can only be built from valid input, so decoding a hex
//! produced by [`hsl_to_hex`] never fails. [`hex_to_rgb`] is the fallible
//! entry point for externally supplied strings.

use crate::error::SwatchError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An 8-bit RGB triple.
///
/// Displays as `rgb(r, g, b)`, the format the remote resolver also uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A 6-digit lowercase hex color without a leading `#`.
///
/// Serializes as a string like `"c0ffee"`, which is also the key shape of
/// the dictionary artifact and the durable cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor(Rgb);

impl HexColor {
    /// Creates a hex color from its channels.
    pub fn from_rgb(rgb: Rgb) -> Self {
        HexColor(rgb)
    }

    /// Parses a 3- or 6-digit hex string with an optional leading `#`.
    ///
    /// Shorthand `abc` is expanded to `aabbcc`. Case is ignored.
    /// Returns `SwatchError::InvalidHexFormat` for anything else.
    pub fn parse(input: &str) -> Result<Self, SwatchError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => digits.to_string(),
        };
        if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SwatchError::InvalidHexFormat(input.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|_| SwatchError::InvalidHexFormat(input.to_string()))
        };
        Ok(HexColor(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }))
    }

    /// Returns the decoded channels.
    pub fn rgb(self) -> Rgb {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.0;
        write!(f, "{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Computes one channel of the chroma-based HSL formula, in [0, 1].
///
/// `offset` is 0 for red, 8 for green, 4 for blue.
fn hsl_channel(offset: f64, hue: f64, saturation: f64, lightness: f64) -> f64 {
    let a = saturation * lightness.min(1.0 - lightness);
    let k = (offset + hue / 30.0) % 12.0;
    lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
}

/// Scales a [0, 1] channel to 8 bits with rounding.
fn to_byte(c: f64) -> u8 {
    (255.0 * c).round().clamp(0.0, 255.0) as u8
}

/// Converts HSL to 8-bit RGB.
///
/// `hue` is in degrees and wrapped into [0, 360); `saturation` and
/// `lightness` are fractions clamped to [0, 1].
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    Rgb {
        r: to_byte(hsl_channel(0.0, h, s, l)),
        g: to_byte(hsl_channel(8.0, h, s, l)),
        b: to_byte(hsl_channel(4.0, h, s, l)),
    }
}

/// Converts an integer hue and fractional saturation/lightness to a hex color.
pub fn hsl_to_hex(hue: u16, saturation: f64, lightness: f64) -> HexColor {
    HexColor(hsl_to_rgb(f64::from(hue), saturation, lightness))
}

/// Decodes an external hex string (3 or 6 digits, optional `#`) to RGB.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, SwatchError> {
    HexColor::parse(hex).map(HexColor::rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- hsl_to_hex --

    #[test]
    fn primaries_at_full_saturation() {
        assert_eq!(hsl_to_hex(0, 1.0, 0.5).to_string(), "ff0000");
        assert_eq!(hsl_to_hex(120, 1.0, 0.5).to_string(), "00ff00");
        assert_eq!(hsl_to_hex(240, 1.0, 0.5).to_string(), "0000ff");
    }

    #[test]
    fn secondaries_at_full_saturation() {
        assert_eq!(hsl_to_hex(60, 1.0, 0.5).to_string(), "ffff00");
        assert_eq!(hsl_to_hex(180, 1.0, 0.5).to_string(), "00ffff");
        assert_eq!(hsl_to_hex(300, 1.0, 0.5).to_string(), "ff00ff");
    }

    #[test]
    fn zero_lightness_is_black_for_every_hue() {
        for hue in 0..360 {
            assert_eq!(hsl_to_hex(hue, 0.0, 0.0).to_string(), "000000", "hue {hue}");
        }
    }

    #[test]
    fn full_lightness_is_white() {
        assert_eq!(hsl_to_hex(200, 0.7, 1.0).to_string(), "ffffff");
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert_eq!(hsl_to_hex(33, 0.0, 0.5).to_string(), "808080");
    }

    #[test]
    fn hue_wraps_past_360() {
        assert_eq!(hsl_to_hex(360, 1.0, 0.5), hsl_to_hex(0, 1.0, 0.5));
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        assert_eq!(hsl_to_hex(0, 2.0, 0.5), hsl_to_hex(0, 1.0, 0.5));
        assert_eq!(hsl_to_hex(0, 1.0, -0.5).to_string(), "000000");
    }

    // -- HexColor / hex_to_rgb --

    #[test]
    fn shorthand_matches_full_form() {
        assert_eq!(hex_to_rgb("#abc").unwrap(), hex_to_rgb("aabbcc").unwrap());
    }

    #[test]
    fn two_digit_input_is_invalid() {
        assert!(matches!(
            hex_to_rgb("12"),
            Err(SwatchError::InvalidHexFormat(_))
        ));
    }

    #[test]
    fn non_hex_digits_are_invalid() {
        assert!(hex_to_rgb("#gggggg").is_err());
        assert!(hex_to_rgb("").is_err());
        assert!(hex_to_rgb("#ff00ff00").is_err());
        assert!(hex_to_rgb("##abc").is_err());
    }

    #[test]
    fn parse_is_case_insensitive_and_normalizes_to_lowercase() {
        let upper = HexColor::parse("#C0FFEE").unwrap();
        assert_eq!(upper.to_string(), "c0ffee");
        assert_eq!(upper, HexColor::parse("c0ffee").unwrap());
    }

    #[test]
    fn rgb_displays_in_css_form() {
        let rgb = hex_to_rgb("804020").unwrap();
        assert_eq!(rgb.to_string(), "rgb(128, 64, 32)");
    }

    #[test]
    fn hex_color_serializes_as_bare_string() {
        let hex = HexColor::parse("#FF0000").unwrap();
        assert_eq!(serde_json::to_string(&hex).unwrap(), "\"ff0000\"");
    }

    #[test]
    fn hex_color_deserialize_rejects_invalid() {
        let result: Result<HexColor, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    #[test]
    fn hex_color_works_as_json_map_key() {
        let map: std::collections::HashMap<HexColor, String> =
            serde_json::from_str(r#"{"000000": "Black"}"#).unwrap();
        let black = HexColor::parse("000").unwrap();
        assert_eq!(map.get(&black).map(String::as_str), Some("Black"));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hsl_to_hex_is_six_lowercase_hex_digits(
                hue in 0u16..360,
                s in 0.0_f64..=1.0,
                l in 0.0_f64..=1.0,
            ) {
                let hex = hsl_to_hex(hue, s, l).to_string();
                prop_assert_eq!(hex.len(), 6);
                prop_assert!(
                    hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
                    "not lowercase hex: {}", hex
                );
            }

            #[test]
            fn hex_round_trip_within_rounding_of_formula(
                hue in 0u16..360,
                s in 0.0_f64..=1.0,
                l in 0.0_f64..=1.0,
            ) {
                let decoded = hex_to_rgb(&hsl_to_hex(hue, s, l).to_string()).unwrap();
                let h = f64::from(hue);
                let direct = [
                    255.0 * hsl_channel(0.0, h, s, l),
                    255.0 * hsl_channel(8.0, h, s, l),
                    255.0 * hsl_channel(4.0, h, s, l),
                ];
                let got = [decoded.r, decoded.g, decoded.b];
                for (channel, expected) in got.iter().zip(direct) {
                    prop_assert!(
                        (f64::from(*channel) - expected).abs() <= 0.5 + 1e-9,
                        "channel {} vs formula {}", channel, expected
                    );
                }
            }
        }
    }
}
