use crate::map::hex::{Terrain, WeatherZone};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration for a map compilation. Compiling the same source with the
/// same config will always give identical output.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    /// Number of curve samples per hex height. Curves are sampled every
    /// `hex_height / samples_per_hex` units, which needs to be fine enough
    /// that no hex gets skipped over, but every extra sample costs a full
    /// point-in-polygon test per nearby hex.
    #[validate(range(min = 1.0))]
    pub samples_per_hex: f64,

    /// Two points are considered the same if they're closer than
    /// `hex_width / epsilon_divisor`. This is relative to the map scale, so
    /// the same config works for any drawing size.
    #[validate(range(min = 1.0))]
    pub epsilon_divisor: f64,

    /// Half-width of the bands drawn along climate zone outlines, as a
    /// fraction of hex width. The default is a third of a hex side (a hex
    /// side is 2/3 of the hex width).
    #[validate(range(min = 0.001, max = 1.0))]
    pub band_offset: f64,

    /// Landmass polygons with at least this many samples are reported as
    /// continents, everything smaller as islands. This only affects logging.
    pub continent_min_samples: usize,

    /// Precedence table for terrain passes. Rules are applied in order, and
    /// each one can only change hexes that currently have the terrain it
    /// refines. This keeps terrain refinement monotonic: a hex goes from
    /// [Terrain::Clear] to one terrain, and optionally on to a stricter one,
    /// but never back.
    #[validate(custom = "validate_terrain_rules")]
    pub terrain_rules: Vec<TerrainRule>,

    /// The order in which weather zones claim hexes. A hex whose center is
    /// inside multiple zones gets the first one in this list. Hexes outside
    /// all of them stay [WeatherZone::Fair].
    #[validate(length(min = 1))]
    pub weather_precedence: Vec<WeatherZone>,

    /// Country-level rules applied while reading hex info labels
    #[validate]
    pub hex_info: HexInfoConfig,
}

/// One entry in the terrain precedence table. See
/// [MapConfig::terrain_rules].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainRule {
    /// Terrain to assign to hexes partly inside the terrain's regions
    pub terrain: Terrain,
    /// Only hexes with exactly this terrain can be changed by this rule
    pub refines: Terrain,
    /// If set, only land hexes can be changed by this rule. Icecap is the
    /// usual exception, since sea can freeze too.
    pub land_only: bool,
}

/// Rules keyed by country, applied on top of whatever the hex info labels
/// say explicitly.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HexInfoConfig {
    /// Countries whose hexes get rail access without having to be flagged
    pub rail_rules: Vec<RailRule>,
    /// Countries whose hexes all have a secondary controller
    pub implicit_controllers: Vec<ImplicitController>,
}

/// Grant rail access to all of a country's land hexes, minus some
/// exceptions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RailRule {
    pub country: String,
    /// Hexes with any of these terrains don't get rail from this rule
    #[serde(default)]
    pub excluded_terrain: Vec<Terrain>,
    /// Hexes in any of these weather zones don't get rail from this rule
    #[serde(default)]
    pub excluded_weather: Vec<WeatherZone>,
    /// If set, colony hexes of the country don't get rail from this rule
    #[serde(default)]
    pub skip_colonies: bool,
}

/// Every land hex of `country` gets `controller` as its secondary
/// controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImplicitController {
    pub country: String,
    pub controller: String,
}

impl MapConfig {
    /// Find the precedence rule for a terrain, if it has one
    pub fn terrain_rule(&self, terrain: Terrain) -> Option<&TerrainRule> {
        self.terrain_rules.iter().find(|rule| rule.terrain == terrain)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            samples_per_hex: 5.0,
            epsilon_divisor: 100.0,
            band_offset: 2.0 / 9.0,
            continent_min_samples: 1000,
            terrain_rules: vec![
                TerrainRule::on_land(Terrain::Desert, Terrain::Clear),
                TerrainRule::on_land(Terrain::Forest, Terrain::Clear),
                TerrainRule::on_land(Terrain::Mountain, Terrain::Clear),
                TerrainRule::on_land(Terrain::TallMountain, Terrain::Mountain),
                TerrainRule {
                    terrain: Terrain::Icecap,
                    refines: Terrain::Clear,
                    land_only: false,
                },
            ],
            weather_precedence: vec![
                WeatherZone::Polar,
                WeatherZone::Industrialized,
                WeatherZone::NorthTemperate,
                WeatherZone::Tropical,
                WeatherZone::SouthTemperate,
            ],
            hex_info: HexInfoConfig::default(),
        }
    }
}

impl TerrainRule {
    /// A rule that only applies to land hexes
    pub const fn on_land(terrain: Terrain, refines: Terrain) -> Self {
        Self {
            terrain,
            refines,
            land_only: true,
        }
    }
}

/// Terrain refinement has to move away from the default, and each terrain
/// can only have one rule, otherwise the precedence is ambiguous.
fn validate_terrain_rules(rules: &[TerrainRule]) -> Result<(), ValidationError> {
    for (i, rule) in rules.iter().enumerate() {
        if rule.terrain == Terrain::Clear || rule.terrain == rule.refines {
            return Err(ValidationError::new("terrain_rule_not_monotonic"));
        }
        if rules[..i].iter().any(|other| other.terrain == rule.terrain) {
            return Err(ValidationError::new("terrain_rule_duplicate"));
        }
    }
    Ok(())
}
