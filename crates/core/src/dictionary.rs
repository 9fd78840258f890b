//! Static hex-to-name dictionary.
//!
//! The dictionary is a pre-built artifact: a JSON object mapping lowercase
//! 6-digit hex strings (no `#`) to color names. It is loaded once and only
//! ever read. Lookups are exact-match; a miss is an ordinary outcome.

use crate::color::HexColor;
use crate::error::SwatchError;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// The artifact shipped with the library, built from `data/ntc-names.json`
/// with `swatch build-dictionary`.
const BUILTIN_ARTIFACT: &str = include_str!("../data/color-name-map.json");

/// Read-only mapping from hex color to canonical color name.
#[derive(Debug, Clone, Default)]
pub struct NameDictionary {
    names: HashMap<HexColor, String>,
}

impl NameDictionary {
    /// Creates a dictionary with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a dictionary artifact.
    ///
    /// Returns `SwatchError::Dictionary` if the text is not a JSON object of
    /// hex keys to string names.
    pub fn from_json(json: &str) -> Result<Self, SwatchError> {
        let names: HashMap<HexColor, String> =
            serde_json::from_str(json).map_err(|e| SwatchError::Dictionary(e.to_string()))?;
        Ok(Self { names })
    }

    /// Reads and parses a dictionary artifact from disk.
    pub fn load(path: &Path) -> Result<Self, SwatchError> {
        let text = std::fs::read_to_string(path)?;
        let dictionary = Self::from_json(&text)?;
        log::debug!(
            "loaded {} dictionary names from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// The dictionary embedded in the library.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_ARTIFACT).expect("embedded color-name-map.json is valid")
    }

    /// Flattens a `[hex, name]` table into a dictionary.
    ///
    /// Keys are normalized to lowercase without `#`. When a hex appears more
    /// than once, the later name wins.
    pub fn from_name_table<I, H, N>(table: I) -> Result<Self, SwatchError>
    where
        I: IntoIterator<Item = (H, N)>,
        H: AsRef<str>,
        N: Into<String>,
    {
        let mut names = HashMap::new();
        for (hex, name) in table {
            let key = HexColor::parse(hex.as_ref())
                .map_err(|e| SwatchError::Dictionary(e.to_string()))?;
            names.insert(key, name.into());
        }
        Ok(Self { names })
    }

    /// Looks up the name for an exact hex match.
    pub fn get(&self, hex: &HexColor) -> Option<&str> {
        self.names.get(hex).map(String::as_str)
    }

    /// Returns the number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the dictionary has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Serializes the dictionary as an artifact with keys in sorted order.
    pub fn to_json_pretty(&self) -> Result<String, SwatchError> {
        let sorted: BTreeMap<String, &str> = self
            .names
            .iter()
            .map(|(hex, name)| (hex.to_string(), name.as_str()))
            .collect();
        serde_json::to_string_pretty(&sorted).map_err(|e| SwatchError::Dictionary(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn builtin_artifact_parses_and_names_black() {
        let dict = NameDictionary::builtin();
        assert!(!dict.is_empty());
        assert_eq!(dict.get(&hex("000000")), Some("Black"));
    }

    #[test]
    fn builtin_names_the_primaries() {
        let dict = NameDictionary::builtin();
        assert_eq!(dict.get(&hex("ff0000")), Some("Red"));
        assert_eq!(dict.get(&hex("00ff00")), Some("Green"));
        assert_eq!(dict.get(&hex("0000ff")), Some("Blue"));
    }

    #[test]
    fn builtin_carries_the_full_name_table() {
        let dict = NameDictionary::builtin();
        assert!(dict.len() > 1500, "only {} names", dict.len());
        assert_eq!(dict.get(&hex("000080")), Some("Navy Blue"));
        assert_eq!(dict.get(&hex("ffd700")), Some("Gold"));
        assert_eq!(dict.get(&hex("ff7f50")), Some("Coral"));
        assert_eq!(dict.get(&hex("4169e1")), Some("Royal Blue"));
        assert_eq!(dict.get(&hex("b57edc")), Some("Lavender"));
    }

    #[test]
    fn shipped_name_table_rebuilds_the_builtin_artifact() {
        let table: Vec<(String, String)> =
            serde_json::from_str(include_str!("../data/ntc-names.json")).unwrap();
        let rebuilt = NameDictionary::from_name_table(table).unwrap();
        let builtin = NameDictionary::builtin();
        assert_eq!(rebuilt.len(), builtin.len());
        assert_eq!(rebuilt.to_json_pretty().unwrap(), builtin.to_json_pretty().unwrap());
    }

    #[test]
    fn miss_returns_none() {
        let dict = NameDictionary::builtin();
        assert_eq!(dict.get(&hex("123456")), None);
    }

    #[test]
    fn from_json_rejects_non_object() {
        assert!(matches!(
            NameDictionary::from_json("[1, 2]"),
            Err(SwatchError::Dictionary(_))
        ));
    }

    #[test]
    fn from_json_rejects_bad_key() {
        assert!(NameDictionary::from_json(r#"{"xyz": "Nope"}"#).is_err());
    }

    #[test]
    fn name_table_lowercases_keys_and_later_entries_win() {
        let dict = NameDictionary::from_name_table([
            ("FF0000", "Red"),
            ("00FF00", "Green"),
            ("ff0000", "Scarlet"),
        ])
        .unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(&hex("ff0000")), Some("Scarlet"));
    }

    #[test]
    fn name_table_rejects_invalid_hex() {
        let result = NameDictionary::from_name_table([("zz", "Nope")]);
        assert!(matches!(result, Err(SwatchError::Dictionary(_))));
    }

    #[test]
    fn artifact_json_reloads_identically() {
        let dict = NameDictionary::from_name_table([("#ABCDEF", "Periwinkle-ish")]).unwrap();
        let json = dict.to_json_pretty().unwrap();
        assert!(json.contains("\"abcdef\""), "keys must be lowercase: {json}");
        let reloaded = NameDictionary::from_json(&json).unwrap();
        assert_eq!(reloaded.get(&hex("abcdef")), Some("Periwinkle-ish"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, r#"{"c0ffee": "Coffee"}"#).unwrap();
        let dict = NameDictionary::load(&path).unwrap();
        assert_eq!(dict.get(&hex("c0ffee")), Some("Coffee"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = NameDictionary::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(SwatchError::Io(_))));
    }
}
