//! Mapsheet compiles a vector drawing of a strategy game map into a hex
//! grid. The drawing is a set of outlines on named layers (landmasses,
//! lakes, terrain, railways, climate zones) plus hex info labels. This crate
//! holds the geometry and classification core. Reading the drawing and
//! emitting the result are left to the caller.
//!
//! ```no_run
//! use mapsheet::{MapConfig, MapSheet, MapSource};
//!
//! let source = MapSource::default(); // Fill this in from your drawing
//! let map = MapSheet::compile(MapConfig::default(), &source).unwrap();
//! println!("{} hexes", map.hexes().len());
//! ```
//!
//! See [MapConfig] for details on how compilation can be customized.

mod config;
mod error;
pub mod geo;
mod map;
mod util;
pub mod zone;

pub use crate::{
    config::{HexInfoConfig, ImplicitController, MapConfig, RailRule, TerrainRule},
    error::MapError,
    map::{
        classify::{Containment, HexClassifier},
        hex::{
            Alignment, City, Hex, HexPoint, HexSide, SideFlags, SurfaceClass,
            Terrain, WeatherZone,
        },
        label::{
            CityFlag, CityLabel, CountryFlag, CountryLabel, HexLabel, LabelLine,
        },
        lattice::HexLattice,
        MapSheet, MapSource, Region, TerrainRegion,
    },
};
