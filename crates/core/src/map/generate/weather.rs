use crate::{
    geo::Polygon,
    map::{
        generate::{MapBuilder, Pass},
        hex::WeatherZone,
    },
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use log::info;

/// Labels each hex with the weather zone its center is in. Where zones
/// overlap, the first one in
/// [MapConfig::weather_precedence](crate::MapConfig::weather_precedence)
/// wins. Hexes outside every zone keep [WeatherZone::Fair].
#[derive(Debug)]
pub struct WeatherPass;

impl Pass for WeatherPass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        // Iteration order of this map is the precedence order
        let mut zones: IndexMap<WeatherZone, Vec<Polygon>, FnvBuildHasher> = map
            .config
            .weather_precedence
            .iter()
            .map(|&zone| (zone, Vec::new()))
            .collect();
        for outline in &map.source.climate_zones {
            // Zones left out of the precedence list never claim hexes
            if let Some(polygons) = zones.get_mut(&outline.zone.weather()) {
                polygons.push(outline.polygon());
            }
        }

        for hex in map.hexes.iter_mut() {
            let center = hex.center();
            let zone = zones
                .iter()
                .find(|(_, polygons)| {
                    polygons.iter().any(|polygon| polygon.contains(center))
                })
                .map(|(zone, _)| *zone);
            if let Some(zone) = zone {
                hex.weather_zone = zone;
            }
        }

        info!(
            "Labeled weather from {} zone outlines",
            map.source.climate_zones.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MapConfig,
        geo::Point,
        map::{hex::HexPoint, lattice::HexLattice, MapSource},
        zone::{ClimateZone, ZoneOutline},
    };

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Point> {
        vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ]
    }

    /// Weather of every hex in a 2x2 lattice, in index order. Hex centers
    /// are (2, 1), (2, 3), (5, 2) and (5, 4). The polar zone covers the top
    /// row of centers, the tropical and southern temperate zones cover
    /// everything.
    fn weather(precedence: Vec<WeatherZone>) -> Vec<WeatherZone> {
        let lattice = HexLattice::new(Point::ORIGIN, 3.0, 2.0, 2, 2);
        let source = MapSource {
            ocean: lattice.outline(),
            climate_zones: vec![
                ZoneOutline::new(
                    "tropics",
                    ClimateZone::Tropical,
                    rect(-1.0, -1.0, 10.0, 10.0),
                ),
                ZoneOutline::new(
                    "arctic",
                    ClimateZone::Polar,
                    rect(-1.0, -1.0, 10.0, 2.5),
                ),
                ZoneOutline::new(
                    "south",
                    ClimateZone::SouthTemperate,
                    rect(-1.0, -1.0, 10.0, 10.0),
                ),
            ],
            ..Default::default()
        };
        let config = MapConfig {
            weather_precedence: precedence,
            ..Default::default()
        };
        let mut map = MapBuilder::new(&config, &source).unwrap();
        WeatherPass.apply(&mut map).unwrap();
        assert_eq!(map.hexes[2].position(), HexPoint::new(1, 0));
        map.hexes.iter().map(|hex| hex.weather_zone()).collect()
    }

    #[test]
    fn test_default_precedence() {
        // Polar beats tropical even though tropical was drawn first
        assert_eq!(
            weather(MapConfig::default().weather_precedence),
            vec![
                WeatherZone::Polar,
                WeatherZone::Tropical,
                WeatherZone::Polar,
                WeatherZone::Tropical,
            ]
        );
    }

    #[test]
    fn test_reordered_precedence() {
        assert_eq!(
            weather(vec![
                WeatherZone::SouthTemperate,
                WeatherZone::Polar,
                WeatherZone::Tropical,
            ]),
            vec![WeatherZone::SouthTemperate; 4]
        );
        assert_eq!(
            weather(vec![WeatherZone::Tropical, WeatherZone::Polar]),
            vec![WeatherZone::Tropical; 4]
        );
    }

    #[test]
    fn test_unlisted_zone() {
        // Tropical and southern temperate are left out, so they never
        // claim the hexes outside the polar zone
        assert_eq!(
            weather(vec![WeatherZone::Polar]),
            vec![
                WeatherZone::Polar,
                WeatherZone::Fair,
                WeatherZone::Polar,
                WeatherZone::Fair,
            ]
        );
    }
}
