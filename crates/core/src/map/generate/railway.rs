use crate::map::generate::{MapBuilder, Pass};
use log::{debug, info};

/// Gives rail access to every land hex a drawn railway runs through
#[derive(Debug)]
pub struct RailwayPass;

impl Pass for RailwayPass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        let source = map.source;
        for region in &source.railways {
            let line = map.sample(region)?;
            let mut changed = 0;
            for hex in map.hexes.iter_mut() {
                if hex.is_land()
                    && map.classifier.is_nearby(hex, &line)
                    && map.classifier.passes_through(hex, &line)
                {
                    hex.can_use_rail = true;
                    changed += 1;
                }
            }
            debug!("Railway {} runs through {} hexes", region.name, changed);
        }
        info!("Applied {} railways", source.railways.len());
        Ok(())
    }
}
