use crate::{
    config::HexInfoConfig,
    error::MapError,
    geo::point_in_polygon,
    map::{
        generate::{MapBuilder, Pass},
        hex::{Hex, Terrain},
        label::{
            CityFlag, CityLabel, CountryFlag, CountryLabel, HexLabel, LabelLine,
        },
    },
};
use fnv::FnvBuildHasher;
use log::info;
use std::collections::HashMap;

/// Reads hex info labels. City lines apply to the labeled hex only. Country
/// lines apply to the labeled hex and every land hex after it (going down
/// each column, then on to the next column) until the next country line, so
/// each country's labels only need to go on its first hex.
#[derive(Debug)]
pub struct HexInfoPass;

impl Pass for HexInfoPass {
    fn apply(&self, map: &mut MapBuilder<'_>) -> anyhow::Result<()> {
        let source = map.source;
        let rules = &map.config.hex_info;
        // Labels are taken out as they're used
        let mut labels = locate_labels(&map.hexes, &source.hex_labels)?;

        let mut country: Option<&CountryLabel> = None;
        for (i, hex) in map.hexes.iter_mut().enumerate() {
            if let Some(label) = labels.remove(&i) {
                for line in &label.lines {
                    match line {
                        LabelLine::City(city) => {
                            apply_city(hex, label, city)?;
                        }
                        LabelLine::Country(next) => country = Some(next),
                    }
                }
            }

            if hex.is_land() {
                let country = country.ok_or_else(|| {
                    MapError::label(
                        hex.center(),
                        format!(
                            "land hex {} comes before any country label",
                            hex.position()
                        ),
                    )
                })?;
                apply_country(hex, country);
                apply_rules(hex, &country.name, rules);
            }
        }

        info!("Applied {} hex labels", source.hex_labels.len());
        Ok(())
    }
}

/// Find the hex each label belongs to, keyed by hex index
fn locate_labels<'a>(
    hexes: &[Hex],
    labels: &'a [HexLabel],
) -> Result<HashMap<usize, &'a HexLabel, FnvBuildHasher>, MapError> {
    let mut located =
        HashMap::with_capacity_and_hasher(labels.len(), FnvBuildHasher::default());
    for label in labels {
        let index = hexes
            .iter()
            .position(|hex| point_in_polygon(label.position, hex.vertices()))
            .ok_or_else(|| MapError::label(label.position, "not inside any hex"))?;
        if located.insert(index, label).is_some() {
            return Err(MapError::label(
                label.position,
                format!("hex {} already has a label", hexes[index].position()),
            ));
        }
    }
    Ok(located)
}

fn apply_city(
    hex: &mut Hex,
    label: &HexLabel,
    city: &CityLabel,
) -> Result<(), MapError> {
    if city.has(CityFlag::Enclave) && city.name.is_none() {
        return Err(MapError::label(
            label.position,
            "enclave flag on a label without a city name",
        ));
    }
    if city.name.is_none() {
        hex.is_resource_hex = true;
    }
    for flag in &city.flags {
        match flag {
            CityFlag::Enclave => hex.is_enclave_city = true,
            CityFlag::Capital => hex.is_capital = true,
            CityFlag::Resource => hex.is_resource_hex = true,
            CityFlag::MajorPort => hex.is_major_port = true,
        }
    }
    hex.city = Some(city.city());
    Ok(())
}

fn apply_country(hex: &mut Hex, country: &CountryLabel) {
    hex.country = Some(country.name.clone());
    for flag in &country.flags {
        match flag {
            CountryFlag::Colony => hex.is_colony = true,
            CountryFlag::Enclave => hex.is_enclave_city = true,
            CountryFlag::Resource => hex.is_resource_hex = true,
            CountryFlag::India => {
                hex.is_india = true;
                if hex.terrain() != Terrain::TallMountain {
                    hex.can_use_rail = true;
                }
            }
            CountryFlag::Rail => hex.can_use_rail = true,
            CountryFlag::MajorPort => hex.is_major_port = true,
            CountryFlag::Controller(controller) => {
                hex.secondary_controller = Some(controller.clone())
            }
        }
    }
}

/// Apply the country-wide rules from config. These never override what a
/// label set explicitly.
fn apply_rules(hex: &mut Hex, country: &str, rules: &HexInfoConfig) {
    for rule in rules.rail_rules.iter().filter(|r| r.country == country) {
        if !rule.excluded_terrain.contains(&hex.terrain())
            && !rule.excluded_weather.contains(&hex.weather_zone())
            && !(rule.skip_colonies && hex.is_colony())
        {
            hex.can_use_rail = true;
        }
    }
    if hex.secondary_controller.is_none() {
        if let Some(rule) = rules
            .implicit_controllers
            .iter()
            .find(|r| r.country == country)
        {
            hex.secondary_controller = Some(rule.controller.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ImplicitController, RailRule},
        geo::Point,
        map::{hex::HexPoint, lattice::HexLattice},
    };

    fn hexes() -> Vec<Hex> {
        HexLattice::new(Point::ORIGIN, 3.0, 2.0, 2, 2).hexes()
    }

    #[test]
    fn test_locate_labels() {
        let hexes = hexes();
        let labels = vec![
            HexLabel::new(Point::new(2.0, 1.0), vec![]),
            HexLabel::new(Point::new(5.0, 4.0), vec![]),
        ];
        let located = locate_labels(&hexes, &labels).unwrap();
        assert_eq!(located.len(), 2);
        assert_eq!(located[&0].position, Point::new(2.0, 1.0));
        // Column 1 is shifted down, so (5, 4) is in its second row
        assert_eq!(hexes[3].position(), HexPoint::new(1, 1));
        assert_eq!(located[&3].position, Point::new(5.0, 4.0));
    }

    #[test]
    fn test_locate_labels_errors() {
        let hexes = hexes();
        let outside = vec![HexLabel::new(Point::new(50.0, 1.0), vec![])];
        assert!(matches!(
            locate_labels(&hexes, &outside),
            Err(MapError::InconsistentLabel { .. })
        ));

        let doubled = vec![
            HexLabel::new(Point::new(2.0, 1.0), vec![]),
            HexLabel::new(Point::new(2.5, 1.5), vec![]),
        ];
        let err = locate_labels(&hexes, &doubled).unwrap_err();
        assert_eq!(
            err,
            MapError::InconsistentLabel {
                position: Point::new(2.5, 1.5),
                reason: "hex (0, 0) already has a label".into(),
            }
        );
    }

    #[test]
    fn test_apply_city() {
        let mut hex = hexes().remove(0);
        let label = HexLabel::new(Point::new(2.0, 1.0), vec![]);
        let city = CityLabel {
            name: Some("Tokyo".into()),
            flags: vec![CityFlag::Capital, CityFlag::MajorPort],
            ..Default::default()
        };
        apply_city(&mut hex, &label, &city).unwrap();
        assert_eq!(hex.city().unwrap().name.as_deref(), Some("Tokyo"));
        assert!(hex.is_capital());
        assert!(hex.is_major_port());
        assert!(!hex.is_resource_hex());

        let site = CityLabel::default();
        apply_city(&mut hex, &label, &site).unwrap();
        assert!(hex.is_resource_hex());

        let bad = CityLabel {
            flags: vec![CityFlag::Enclave],
            ..Default::default()
        };
        assert!(matches!(
            apply_city(&mut hex, &label, &bad),
            Err(MapError::InconsistentLabel { .. })
        ));
    }

    #[test]
    fn test_country_flags_and_rules() {
        let mut hex = hexes().remove(0);
        hex.fill_land();
        hex.terrain = Terrain::TallMountain;
        let country = CountryLabel::new(
            "india",
            vec![
                CountryFlag::India,
                CountryFlag::Colony,
                CountryFlag::Controller("uk".into()),
            ],
        );
        apply_country(&mut hex, &country);
        assert_eq!(hex.country(), Some("india"));
        assert!(hex.is_india());
        assert!(hex.is_colony());
        // Tall mountains don't get rail from the India flag
        assert!(!hex.can_use_rail());
        assert_eq!(hex.secondary_controller(), Some("uk"));

        let rules = HexInfoConfig {
            rail_rules: vec![RailRule {
                country: "india".into(),
                excluded_terrain: vec![],
                excluded_weather: vec![],
                skip_colonies: true,
            }],
            implicit_controllers: vec![ImplicitController {
                country: "india".into(),
                controller: "japan".into(),
            }],
        };
        apply_rules(&mut hex, "india", &rules);
        // Colony is skipped, and the explicit controller stays
        assert!(!hex.can_use_rail());
        assert_eq!(hex.secondary_controller(), Some("uk"));

        hex.is_colony = false;
        hex.secondary_controller = None;
        apply_rules(&mut hex, "india", &rules);
        assert!(hex.can_use_rail());
        assert_eq!(hex.secondary_controller(), Some("japan"));
    }
}
