use crate::map::generate::{MapBuilder, Pass};
use log::{debug, info};

/// Carves lakes back out of land. This runs after every landmass has been
/// applied, so lakes always win over the land around them.
#[derive(Debug)]
pub struct LakePass;

impl Pass for LakePass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        let source = map.source;
        for region in &source.lakes {
            let polygon = map.sample(region)?;
            let mut touched = 0;
            for hex in map.hexes.iter_mut() {
                if map.classifier.apply_sea(hex, &polygon).partly {
                    touched += 1;
                }
            }
            debug!("Lake {} touches {} hexes", region.name, touched);
        }
        info!("Applied {} lakes", source.lakes.len());
        Ok(())
    }
}
