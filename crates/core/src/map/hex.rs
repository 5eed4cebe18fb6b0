//! Basic types for the cells of the hex lattice. See [HexLattice] for how the
//! cells are laid out in drawing space.
//!
//! [HexLattice]: crate::HexLattice

use crate::geo::Point;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops;
use strum::{EnumIter, EnumString, IntoEnumIterator};

/// Column/row position of a hex in the lattice. Columns run left to right,
/// rows top to bottom, both starting at 0.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct HexPoint {
    pub x: u16,
    pub y: u16,
}

impl HexPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// One side of a hex. The discriminant of each side is its index in
/// [SideFlags]. Side `i` runs between vertex `i - 1` and vertex `i`, so the
/// vertex order is: 0 top-left, 1 left, 2 bottom-left, 3 bottom-right,
/// 4 right, 5 top-right.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HexSide {
    Top = 0,
    TopLeft = 1,
    BottomLeft = 2,
    Bottom = 3,
    BottomRight = 4,
    TopRight = 5,
}

impl HexSide {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Indexes of the two vertices at the ends of this side, as
    /// `(previous, this)`
    pub fn vertex_indices(self) -> (usize, usize) {
        let i = self.index();
        ((i + 5) % 6, i)
    }
}

/// One boolean per side of a hex, indexed by [HexSide]. This always holds
/// exactly 6 values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideFlags([bool; 6]);

impl SideFlags {
    /// Every side set
    pub const ALL: Self = Self([true; 6]);
    /// No side set
    pub const NONE: Self = Self([false; 6]);

    pub fn get(&self, side: HexSide) -> bool {
        self.0[side.index()]
    }

    pub fn set(&mut self, side: HexSide, value: bool) {
        self.0[side.index()] = value;
    }

    pub fn as_array(&self) -> [bool; 6] {
        self.0
    }

    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl ops::Index<HexSide> for SideFlags {
    type Output = bool;

    fn index(&self, side: HexSide) -> &bool {
        &self.0[side.index()]
    }
}

/// Terrain drawn on the map. A hex can only have one terrain at a time.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Terrain {
    /// Default terrain, for hexes no terrain region covers
    Clear,
    Desert,
    Forest,
    Mountain,
    /// Stricter refinement of [Terrain::Mountain]
    TallMountain,
    /// Ice sheets. Unlike the other terrains this can be on sea hexes.
    Icecap,
}

impl Default for Terrain {
    fn default() -> Self {
        Self::Clear
    }
}

/// Climate zone label for a hex.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeatherZone {
    /// The default, for hexes outside every drawn zone. This includes the
    /// belt between the northern temperate and tropical zones.
    Fair,
    Polar,
    Industrialized,
    NorthTemperate,
    Tropical,
    SouthTemperate,
}

impl Default for WeatherZone {
    fn default() -> Self {
        Self::Fair
    }
}

/// Combination of a hex's land/sea state and terrain, which is what
/// ultimately decides what kind of hex it is in game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceClass {
    Sea,
    Land(Terrain),
    /// Hex with both land and sea
    Coastal(Terrain),
    LandIce,
    SeaIce,
    CoastalIce,
}

/// Which side of a city marker its name is written on
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Alignment {
    Top,
    Bottom,
    Left,
    Right,
}

impl Default for Alignment {
    fn default() -> Self {
        Self::Right
    }
}

/// A city (or an unnamed resource site) placed in a hex by a hex info label
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// `None` for a non-city resource hex
    pub name: Option<String>,
    pub alignment: Alignment,
    /// Offset of the name text from its default spot
    pub offset: Point,
}

/// One cell of the lattice. Hexes are all created up front by
/// [HexLattice::hexes], then mutated in place by each classification pass.
/// Their position and geometry never change.
///
/// [HexLattice::hexes]: crate::HexLattice::hexes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hex {
    pub(crate) position: HexPoint,
    /// Corners of the hex, in [HexSide] vertex order
    pub(crate) vertices: [Point; 6],
    pub(crate) center: Point,

    // Land and sea aren't exclusive: a coastal hex has both
    pub(crate) is_land: bool,
    pub(crate) is_sea: bool,
    pub(crate) terrain: Terrain,
    pub(crate) weather_zone: WeatherZone,
    pub(crate) adjacent_land: SideFlags,
    pub(crate) adjacent_sea: SideFlags,

    pub(crate) can_use_rail: bool,
    pub(crate) country: Option<String>,
    pub(crate) secondary_controller: Option<String>,
    pub(crate) city: Option<City>,
    pub(crate) is_colony: bool,
    pub(crate) is_resource_hex: bool,
    pub(crate) is_capital: bool,
    pub(crate) is_enclave_city: bool,
    pub(crate) is_major_port: bool,
    pub(crate) is_india: bool,
}

impl Hex {
    /// Create an all-sea hex with default everything
    pub fn new(position: HexPoint, vertices: [Point; 6], center: Point) -> Self {
        Self {
            position,
            vertices,
            center,
            is_land: false,
            is_sea: true,
            terrain: Terrain::Clear,
            weather_zone: WeatherZone::Fair,
            adjacent_land: SideFlags::NONE,
            adjacent_sea: SideFlags::ALL,
            can_use_rail: false,
            country: None,
            secondary_controller: None,
            city: None,
            is_colony: false,
            is_resource_hex: false,
            is_capital: false,
            is_enclave_city: false,
            is_major_port: false,
            is_india: false,
        }
    }

    pub fn position(&self) -> HexPoint {
        self.position
    }

    pub fn vertices(&self) -> &[Point; 6] {
        &self.vertices
    }

    /// Midpoint of one side of this hex
    pub fn side_midpoint(&self, side: HexSide) -> Point {
        let (previous, this) = side.vertex_indices();
        self.vertices[previous].midpoint(self.vertices[this])
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Is any part of this hex land?
    pub fn is_land(&self) -> bool {
        self.is_land
    }

    /// Is any part of this hex sea? A hex that's both land and sea is
    /// coastal.
    pub fn is_sea(&self) -> bool {
        self.is_sea
    }

    pub fn is_coastal(&self) -> bool {
        self.is_land && self.is_sea
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn weather_zone(&self) -> WeatherZone {
        self.weather_zone
    }

    /// Sides of this hex that border land
    pub fn adjacent_land(&self) -> SideFlags {
        self.adjacent_land
    }

    /// Sides of this hex that border sea
    pub fn adjacent_sea(&self) -> SideFlags {
        self.adjacent_sea
    }

    pub fn can_use_rail(&self) -> bool {
        self.can_use_rail
    }

    /// Owning country. Only land hexes have one.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Country that takes over this hex under some scenario-specific
    /// condition
    pub fn secondary_controller(&self) -> Option<&str> {
        self.secondary_controller.as_deref()
    }

    pub fn city(&self) -> Option<&City> {
        self.city.as_ref()
    }

    pub fn is_colony(&self) -> bool {
        self.is_colony
    }

    pub fn is_resource_hex(&self) -> bool {
        self.is_resource_hex
    }

    pub fn is_capital(&self) -> bool {
        self.is_capital
    }

    pub fn is_enclave_city(&self) -> bool {
        self.is_enclave_city
    }

    pub fn is_major_port(&self) -> bool {
        self.is_major_port
    }

    pub fn is_india(&self) -> bool {
        self.is_india
    }

    /// Make this hex entirely land: every side borders land, none border
    /// sea.
    pub(crate) fn fill_land(&mut self) {
        self.is_land = true;
        self.is_sea = false;
        self.adjacent_land = SideFlags::ALL;
        self.adjacent_sea = SideFlags::NONE;
    }

    /// Make this hex entirely sea: every side borders sea, none border land.
    pub(crate) fn fill_sea(&mut self) {
        self.is_sea = true;
        self.is_land = false;
        self.adjacent_sea = SideFlags::ALL;
        self.adjacent_land = SideFlags::NONE;
    }

    /// Combine land/sea state and terrain into the hex's final class.
    /// Icecap takes over the whole classification; otherwise any sea makes
    /// a land hex coastal.
    pub fn surface_class(&self) -> SurfaceClass {
        match (self.terrain, self.is_land, self.is_sea) {
            (Terrain::Icecap, _, false) => SurfaceClass::LandIce,
            (Terrain::Icecap, false, _) => SurfaceClass::SeaIce,
            (Terrain::Icecap, true, true) => SurfaceClass::CoastalIce,
            (_, false, _) => SurfaceClass::Sea,
            (terrain, true, true) => SurfaceClass::Coastal(terrain),
            (terrain, true, false) => SurfaceClass::Land(terrain),
        }
    }
}

/// Iterate over all six sides, in index order
pub fn sides() -> impl Iterator<Item = HexSide> {
    HexSide::iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex() -> Hex {
        Hex::new(HexPoint::new(0, 0), [Point::ORIGIN; 6], Point::ORIGIN)
    }

    #[test]
    fn test_side_vertices() {
        assert_eq!(HexSide::Top.vertex_indices(), (5, 0));
        assert_eq!(HexSide::TopLeft.vertex_indices(), (0, 1));
        assert_eq!(HexSide::TopRight.vertex_indices(), (4, 5));
        assert_eq!(sides().count(), 6);
        assert_eq!(
            sides().map(HexSide::index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_side_flags() {
        let mut flags = SideFlags::NONE;
        assert!(flags.is_none());
        flags.set(HexSide::Bottom, true);
        assert!(flags[HexSide::Bottom]);
        assert!(!flags.get(HexSide::Top));
        assert_eq!(flags.as_array(), [false, false, false, true, false, false]);
        // The shared constants never change
        assert!(SideFlags::NONE.is_none());
        assert!(SideFlags::ALL.is_all());
    }

    #[test]
    fn test_new_hex_is_sea() {
        let hex = hex();
        assert!(!hex.is_land());
        assert!(hex.is_sea());
        assert!(hex.adjacent_land().is_none());
        assert!(hex.adjacent_sea().is_all());
        assert_eq!(hex.terrain(), Terrain::Clear);
        assert_eq!(hex.weather_zone(), WeatherZone::Fair);
        assert_eq!(hex.surface_class(), SurfaceClass::Sea);
    }

    #[test]
    fn test_surface_class() {
        let mut hex = hex();
        hex.is_land = true;
        assert_eq!(hex.surface_class(), SurfaceClass::Coastal(Terrain::Clear));
        hex.terrain = Terrain::Forest;
        assert_eq!(hex.surface_class(), SurfaceClass::Coastal(Terrain::Forest));
        hex.is_sea = false;
        assert_eq!(hex.surface_class(), SurfaceClass::Land(Terrain::Forest));

        hex.terrain = Terrain::Icecap;
        assert_eq!(hex.surface_class(), SurfaceClass::LandIce);
        hex.is_sea = true;
        assert_eq!(hex.surface_class(), SurfaceClass::CoastalIce);
        hex.is_land = false;
        assert_eq!(hex.surface_class(), SurfaceClass::SeaIce);
    }
}
