use crate::{
    error::MapError,
    geo::Path,
    map::generate::{MapBuilder, Pass},
    zone::{
        belt_classes, offset::offset_path, trace::BoundaryTracer, ClimateZone,
        ZoneBand, ZoneOutline,
    },
};
use anyhow::Context;
use log::info;

/// Builds the bands along every climate zone boundary, including the traced
/// boundary of the fair-weather belt between the northern temperate and
/// tropical zones. This doesn't touch the hexes.
#[derive(Debug)]
pub struct ZoneBandPass;

impl Pass for ZoneBandPass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        let source = map.source;
        let outlines = &source.climate_zones;
        let radius = map.lattice.hex_width() * map.config.band_offset;
        let of_zone = move |zone: ClimateZone| {
            outlines.iter().filter(move |outline| outline.zone == zone)
        };
        let paths = |zone: ClimateZone| -> anyhow::Result<Vec<Path>> {
            of_zone(zone)
                .map(|outline| {
                    outline.path().with_context(|| {
                        format!("error reading zone outline {}", outline.name)
                    })
                })
                .collect()
        };

        let belts = BoundaryTracer::new(map.classifier.epsilon())
            .trace(
                &paths(ClimateZone::NorthTemperate)?,
                &paths(ClimateZone::Tropical)?,
            )
            .context("error tracing fair belt")?;
        info!("Traced {} fair belt loops", belts.len());

        let mut bands = Vec::new();
        // Drawing order matters for overlapping bands
        for zone in [
            ClimateZone::Polar,
            ClimateZone::Industrialized,
            ClimateZone::NorthTemperate,
            ClimateZone::Tropical,
        ] {
            for outline in of_zone(zone) {
                bands.extend(outline_bands(outline, radius)?);
            }
        }
        if !belts.is_empty() {
            let polar_reference = of_zone(ClimateZone::Polar)
                .find_map(|outline| outline.vertices.first().copied())
                .ok_or_else(|| {
                    MapError::malformed(
                        "polar",
                        "no polar zone outline to orient the fair belt",
                    )
                })?;
            for (i, belt) in belts.iter().enumerate() {
                let name = format!("fair belt {}", i);
                let offsets = offset_path(belt, radius)
                    .with_context(|| format!("error offsetting {}", name))?;
                let classes = belt_classes(&offsets, polar_reference);
                bands.extend(ZoneBand::from_offsets(&name, offsets, classes));
            }
        }
        for outline in of_zone(ClimateZone::SouthTemperate) {
            bands.extend(outline_bands(outline, radius)?);
        }

        info!("Built {} zone bands", bands.len());
        map.belts = belts;
        map.bands = bands;
        Ok(())
    }
}

fn outline_bands(
    outline: &ZoneOutline,
    radius: f64,
) -> anyhow::Result<Vec<ZoneBand>> {
    let offsets = outline
        .path()
        .and_then(|path| offset_path(&path, radius))
        .with_context(|| {
            format!("error offsetting zone outline {}", outline.name)
        })?;
    Ok(ZoneBand::from_offsets(
        &outline.name,
        offsets,
        outline.zone.band_classes(),
    ))
}
