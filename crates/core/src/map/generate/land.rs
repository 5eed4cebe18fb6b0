use crate::{
    geo::Polygon,
    map::generate::{MapBuilder, Pass},
};
use log::{debug, info};

/// Marks hexes covered by landmasses as land. Landmasses are applied
/// smallest first, and hexes that are already entirely land are skipped, so
/// the big continents only have to deal with whatever's left over.
#[derive(Debug)]
pub struct LandPass;

impl Pass for LandPass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        let source = map.source;
        let mut landmasses = source
            .landmasses
            .iter()
            .map(|region| Ok((region.name.as_str(), map.sample(region)?)))
            .collect::<anyhow::Result<Vec<(&str, Polygon)>>>()?;
        landmasses.sort_by_key(|(_, polygon)| polygon.len());

        let mut continents = 0;
        for (name, polygon) in &landmasses {
            let kind = if polygon.len() >= map.config.continent_min_samples {
                continents += 1;
                "continent"
            } else {
                "island"
            };

            let mut touched = 0;
            for hex in map.hexes.iter_mut().filter(|hex| hex.is_sea()) {
                if map.classifier.apply_land(hex, polygon).partly {
                    touched += 1;
                }
            }
            debug!(
                "Landmass {} ({}, {} samples) touches {} hexes",
                name,
                kind,
                polygon.len(),
                touched
            );
        }

        info!(
            "Applied {} continents and {} islands",
            continents,
            landmasses.len() - continents
        );
        Ok(())
    }
}
