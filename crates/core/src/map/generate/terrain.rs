use crate::{
    error::MapError,
    map::generate::{MapBuilder, Pass},
};
use log::{debug, info};

/// Assigns terrain to land hexes. Rules run in the order of
/// [MapConfig::terrain_rules](crate::MapConfig::terrain_rules), and a rule
/// only touches hexes whose terrain is exactly the one it refines, so a hex's
/// terrain can only move forward through the table.
#[derive(Debug)]
pub struct TerrainPass;

impl Pass for TerrainPass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        let source = map.source;
        let config = map.config;
        // Every region has to be covered by the table, otherwise it would be
        // silently dropped
        for region in &source.terrain {
            if config.terrain_rule(region.terrain).is_none() {
                return Err(MapError::malformed(
                    &region.region.name,
                    format!("no terrain rule for {}", region.terrain),
                )
                .into());
            }
        }

        for rule in &config.terrain_rules {
            for region in
                source.terrain.iter().filter(|r| r.terrain == rule.terrain)
            {
                let polygon = map.sample(&region.region)?;
                let mut changed = 0;
                for hex in map.hexes.iter_mut() {
                    if (rule.land_only && !hex.is_land())
                        || hex.terrain() != rule.refines
                    {
                        continue;
                    }
                    if map.classifier.classify(hex, &polygon).partly {
                        hex.terrain = rule.terrain;
                        changed += 1;
                    }
                }
                debug!(
                    "{} region {} changed {} hexes",
                    rule.terrain, region.region.name, changed
                );
            }
        }

        info!("Applied {} terrain regions", source.terrain.len());
        Ok(())
    }
}
