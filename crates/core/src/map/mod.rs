pub mod classify;
mod generate;
pub mod hex;
pub mod label;
pub mod lattice;

use crate::{
    config::MapConfig,
    geo::{curve::PathCurve, Path, Point},
    map::{
        generate::{MapBuilder, MapOutput},
        hex::{Hex, HexPoint, Terrain},
        label::HexLabel,
        lattice::HexLattice,
    },
    timed,
    zone::{ZoneBand, ZoneOutline},
};
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named outline from the source drawing
#[derive(Debug)]
pub struct Region {
    /// Identifies the region in logs and error messages
    pub name: String,
    pub curve: PathCurve,
}

impl Region {
    pub fn new(name: impl Into<String>, curve: PathCurve) -> Self {
        Self {
            name: name.into(),
            curve,
        }
    }
}

/// A region drawn on one of the terrain layers
#[derive(Debug)]
pub struct TerrainRegion {
    pub terrain: Terrain,
    pub region: Region,
}

impl TerrainRegion {
    pub fn new(terrain: Terrain, region: Region) -> Self {
        Self { terrain, region }
    }
}

/// Everything read out of the source drawing, already sorted by layer. This
/// is the input to [MapSheet::compile].
#[derive(Debug, Default)]
pub struct MapSource {
    /// Corners of the background ocean outline, which traces the outer edge
    /// of the hex grid. See [HexLattice::from_outline].
    pub ocean: Vec<Point>,
    pub landmasses: Vec<Region>,
    pub lakes: Vec<Region>,
    pub terrain: Vec<TerrainRegion>,
    pub railways: Vec<Region>,
    pub climate_zones: Vec<ZoneOutline>,
    pub hex_labels: Vec<HexLabel>,
}

/// A fully compiled map. Contains every hex in the lattice, the zone bands,
/// and the configuration that was used to compile it.
///
/// ## Serialization
/// With the `json` feature, maps can be saved with [MapSheet::to_json] and
/// loaded with [MapSheet::from_json]. All fields and values use snake case,
/// and hexes are stored as a flat list in column-major order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSheet {
    /// The config used to compile this map. Compilation is deterministic
    /// based on config and source drawing.
    config: MapConfig,
    lattice: HexLattice,
    /// Every hex, in [HexLattice::index] order
    hexes: Vec<Hex>,
    /// Traced outlines of the fair-weather belt
    belts: Vec<Path>,
    bands: Vec<ZoneBand>,
}

impl MapSheet {
    /// Compile a map from its source drawing. Returns an error if the config
    /// is invalid or anything in the drawing can't be used. Every error is
    /// fatal: it's better to produce no map than a half-right one. The
    /// underlying [MapError](crate::MapError) can be recovered with
    /// [anyhow::Error::downcast_ref].
    pub fn compile(
        config: MapConfig,
        source: &MapSource,
    ) -> anyhow::Result<Self> {
        info!("Compiling map with config {:#?}", config);

        config.validate().context("invalid config")?;

        let MapOutput {
            lattice,
            hexes,
            belts,
            bands,
        } = timed!(
            "Map compilation",
            log::Level::Info,
            MapBuilder::new(&config, source)?.build()
        )?;

        Ok(Self {
            config,
            lattice,
            hexes,
            belts,
            bands,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn lattice(&self) -> &HexLattice {
        &self.lattice
    }

    /// Every hex in the map, column by column
    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    /// Get the hex at a position, if the lattice has one there
    pub fn hex(&self, position: HexPoint) -> Option<&Hex> {
        self.lattice
            .index(position)
            .and_then(|index| self.hexes.get(index))
    }

    pub fn into_hexes(self) -> Vec<Hex> {
        self.hexes
    }

    /// Closed outlines of the fair-weather belt, traced from the gap between
    /// the northern temperate and tropical zones
    pub fn belts(&self) -> &[Path] {
        &self.belts
    }

    /// Bands along every zone boundary, labeled with their zone class
    pub fn bands(&self) -> &[ZoneBand] {
        &self.bands
    }

    /// Serialize this map into JSON. This is a recoverable format, which
    /// can be loaded back with [MapSheet::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing map")
    }

    /// Deserialize a map from JSON produced by [MapSheet::to_json]. Will
    /// fail if the input is malformed.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ClimateZone;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Point> {
        vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ]
    }

    #[test]
    fn test_serde_is_exact() {
        // Thirds of a hex everywhere, none of which are exact in binary
        let lattice = HexLattice::new(Point::new(0.1, 0.7), 3.3, 2.2, 3, 2);
        let source = MapSource {
            ocean: lattice.outline(),
            climate_zones: vec![ZoneOutline::new(
                "arctic",
                ClimateZone::Polar,
                rect(0.3, 0.1, 7.7, 2.9),
            )],
            ..Default::default()
        };
        let map = MapSheet::compile(MapConfig::default(), &source).unwrap();
        assert_eq!(map.bands().len(), 2);

        let json = serde_json::to_string(&map).unwrap();
        let loaded: MapSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.lattice(), map.lattice());
        assert_eq!(loaded.bands(), map.bands());
        for (a, b) in loaded.hexes().iter().zip(map.hexes()) {
            assert_eq!(a.vertices(), b.vertices());
            assert_eq!(a.center(), b.center());
        }
    }
}
