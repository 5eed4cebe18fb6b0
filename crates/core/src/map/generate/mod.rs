mod info;
mod lake;
mod land;
mod railway;
mod terrain;
mod weather;
mod zones;

use crate::{
    config::MapConfig,
    geo::{Path, Polygon},
    map::{
        classify::HexClassifier,
        generate::{
            info::HexInfoPass, lake::LakePass, land::LandPass,
            railway::RailwayPass, terrain::TerrainPass, weather::WeatherPass,
            zones::ZoneBandPass,
        },
        hex::Hex,
        lattice::HexLattice,
        MapSource, Region,
    },
    timed,
    zone::ZoneBand,
};
use anyhow::Context;
use log::info;
use std::fmt::Debug;

/// A container for compiling a map. This applies a series of passes in
/// sequence, each one reading some part of the source drawing and writing
/// its results into the hexes. These fields are public to allow for disjoint
/// borrowing of multiple fields at once.
pub struct MapBuilder<'a> {
    /// Compilation is deterministic based on config and source, so **do not
    /// mutate the config**.
    pub config: &'a MapConfig,
    pub source: &'a MapSource,
    pub lattice: HexLattice,
    pub classifier: HexClassifier,

    /// Every hex in the lattice, in [HexLattice::index] order. Hexes are
    /// mutated by the passes, but never added, removed or moved.
    pub hexes: Vec<Hex>,

    /// Traced outlines of the fair-weather belt. Populated by the zone band
    /// pass.
    pub belts: Vec<Path>,
    /// Populated by the zone band pass
    pub bands: Vec<ZoneBand>,
}

/// Everything a finished compilation produces
pub struct MapOutput {
    pub lattice: HexLattice,
    pub hexes: Vec<Hex>,
    pub belts: Vec<Path>,
    pub bands: Vec<ZoneBand>,
}

impl<'a> MapBuilder<'a> {
    pub fn new(
        config: &'a MapConfig,
        source: &'a MapSource,
    ) -> anyhow::Result<Self> {
        let lattice = HexLattice::from_outline(&source.ocean)
            .context("error reading hex lattice from ocean outline")?;
        let hexes = timed!("Lattice initialization", lattice.hexes());
        info!(
            "Initialized {}x{} lattice with {} hexes",
            lattice.width(),
            lattice.height(),
            hexes.len()
        );

        Ok(Self {
            config,
            source,
            lattice,
            classifier: HexClassifier::new(&lattice, config),
            hexes,
            belts: Vec::new(),
            bands: Vec::new(),
        })
    }

    /// Distance between consecutive samples when turning curves into
    /// polygons
    pub fn resolution(&self) -> f64 {
        self.lattice.hex_height() / self.config.samples_per_hex
    }

    /// Sample a region's curve into a polygon at the map's resolution
    pub fn sample(&self, region: &Region) -> anyhow::Result<Polygon> {
        Polygon::sample(&region.name, &region.curve, self.resolution())
            .with_context(|| format!("error sampling region {}", region.name))
    }

    /// Compile the map by running every pass in order. Must be run from a
    /// blank slate.
    pub fn build(mut self) -> anyhow::Result<MapOutput> {
        // The order is very important! Terrain needs land, rail and hex
        // info need terrain, and rail rules need weather.
        self.apply_pass(LandPass)?;
        self.apply_pass(LakePass)?;
        self.apply_pass(TerrainPass)?;
        self.apply_pass(RailwayPass)?;
        self.apply_pass(WeatherPass)?;
        self.apply_pass(HexInfoPass)?;
        self.apply_pass(ZoneBandPass)?;

        Ok(MapOutput {
            lattice: self.lattice,
            hexes: self.hexes,
            belts: self.belts,
            bands: self.bands,
        })
    }

    /// A helper to run a single pass on this builder.
    fn apply_pass(&mut self, pass: impl Debug + Pass) -> anyhow::Result<()> {
        timed!(&format!("{:?}", pass), pass.apply(self))
            .with_context(|| format!("error in {:?}", pass))
    }
}

/// One step of map compilation. Each pass reads one kind of source data and
/// mutates the hexes to add what it learns. A pass can never add or remove
/// hexes, or change their positions. Any error here means the source drawing
/// has a problem, and the whole compilation fails.
trait Pass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()>;
}
