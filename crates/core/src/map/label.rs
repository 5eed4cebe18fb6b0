//! Hex info labels: text placed on the map that assigns cities and
//! countries to hexes. Whatever reads the drawing is responsible for
//! decoding the label text into these types.

use crate::{
    geo::Point,
    map::hex::{Alignment, City},
};
use serde::{Deserialize, Serialize};

/// One label placed on the map. It applies to whichever hex contains its
/// position, and each hex can hold at most one label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLabel {
    pub position: Point,
    pub lines: Vec<LabelLine>,
}

impl HexLabel {
    pub fn new(position: Point, lines: Vec<LabelLine>) -> Self {
        Self { position, lines }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelLine {
    /// Applies to the labeled hex only
    City(CityLabel),
    /// Applies to the labeled hex and every land hex after it, until the
    /// next country label
    Country(CountryLabel),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityLabel {
    /// `None` marks a resource site with no city
    pub name: Option<String>,
    pub alignment: Alignment,
    pub offset: Point,
    pub flags: Vec<CityFlag>,
}

impl CityLabel {
    pub fn has(&self, flag: CityFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// The city placed in the hex
    pub fn city(&self) -> City {
        City {
            name: self.name.clone(),
            alignment: self.alignment,
            offset: self.offset,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityFlag {
    /// The city is an enclave of a country other than its surroundings.
    /// Only valid on a named city.
    Enclave,
    Capital,
    Resource,
    MajorPort,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryLabel {
    pub name: String,
    #[serde(default)]
    pub flags: Vec<CountryFlag>,
}

impl CountryLabel {
    pub fn new(name: impl Into<String>, flags: Vec<CountryFlag>) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryFlag {
    Colony,
    Enclave,
    Resource,
    /// Gets rail everywhere except tall mountains
    India,
    Rail,
    MajorPort,
    /// Hexes are taken over by this country under some scenario condition
    Controller(String),
}
