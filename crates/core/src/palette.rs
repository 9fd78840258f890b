//! Ordered palette of named swatches.
//!
//! A palette holds at most one swatch per color name. Swatches keep the
//! order in which the hue sweep discovered them.

use crate::color::HexColor;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Which resolution tier produced a swatch's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameSource {
    Dictionary,
    Cache,
    Remote,
}

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub name: String,
    /// Display form, e.g. `rgb(255, 0, 0)`.
    pub rgb: String,
    pub hex: HexColor,
    /// The hue (degrees) that first produced this name.
    pub hue: u16,
    pub source: NameSource,
}

/// Name-keyed, insertion-ordered set of swatches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    swatches: Vec<Swatch>,
    names: HashSet<String>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a swatch unless its name is already present.
    ///
    /// Returns `false` (and leaves the palette unchanged) for a duplicate
    /// name; the earlier swatch keeps the slot.
    pub fn insert(&mut self, swatch: Swatch) -> bool {
        if !self.names.insert(swatch.name.clone()) {
            return false;
        }
        self.swatches.push(swatch);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.name == name)
    }

    /// Swatches in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn clear(&mut self) {
        self.swatches.clear();
        self.names.clear();
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.swatches.serialize(serializer)
    }
}
