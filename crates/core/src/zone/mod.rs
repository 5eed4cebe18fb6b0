//! Climate zones and the bands drawn along their edges. Zone outlines come
//! out of the drawing tagged by stroke color. Each outline gets a pair of
//! offset bands, one on each side of it. The fair-weather belt isn't drawn
//! at all, so its outline is traced from the gap between the northern
//! temperate and tropical zones (see [trace]).

pub mod offset;
pub mod trace;

use crate::{
    error::MapError,
    geo::{point_in_polygon, Path, Point, Polygon},
    map::hex::WeatherZone,
    zone::offset::OffsetPair,
};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// A drawn climate zone. Every hex outside all of these is
/// [WeatherZone::Fair].
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClimateZone {
    Polar,
    Industrialized,
    NorthTemperate,
    Tropical,
    SouthTemperate,
}

impl ClimateZone {
    /// Figure out which zone an outline belongs to from its stroke color.
    /// Zones are told apart by whichever channel dominates: red for
    /// tropical, green for northern temperate, blue for polar, red+green
    /// (yellowish) for southern temperate, and anything else (grays) for
    /// industrialized.
    pub fn from_stroke_color(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = (r as i32, g as i32, b as i32);
        if r - g - b > 0 {
            Self::Tropical
        } else if g - r - b > 0 {
            Self::NorthTemperate
        } else if b - r - g > 0 {
            Self::Polar
        } else if r + g - 4 * b > 0 {
            Self::SouthTemperate
        } else {
            Self::Industrialized
        }
    }

    /// The weather hexes inside this zone get
    pub fn weather(self) -> WeatherZone {
        match self {
            Self::Polar => WeatherZone::Polar,
            Self::Industrialized => WeatherZone::Industrialized,
            Self::NorthTemperate => WeatherZone::NorthTemperate,
            Self::Tropical => WeatherZone::Tropical,
            Self::SouthTemperate => WeatherZone::SouthTemperate,
        }
    }

    /// Classes of the bands along this zone's outline, as `(inner, outer)`.
    /// `None` means no band is drawn on that side.
    pub fn band_classes(self) -> (Option<ZoneClass>, Option<ZoneClass>) {
        match self {
            Self::Polar => (Some(ZoneClass::Polar), Some(ZoneClass::Temperate)),
            Self::Industrialized => {
                (Some(ZoneClass::Industrialized), Some(ZoneClass::Temperate))
            }
            Self::NorthTemperate => (Some(ZoneClass::Temperate), None),
            Self::Tropical => (Some(ZoneClass::Tropical), None),
            Self::SouthTemperate => {
                (Some(ZoneClass::Temperate), Some(ZoneClass::Fair))
            }
        }
    }
}

impl From<ClimateZone> for WeatherZone {
    fn from(zone: ClimateZone) -> Self {
        zone.weather()
    }
}

/// Label for one side of a zone boundary
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneClass {
    Polar,
    Temperate,
    Industrialized,
    Tropical,
    Fair,
}

/// One climate zone outline from the drawing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneOutline {
    /// Identifies the outline in error messages
    pub name: String,
    pub zone: ClimateZone,
    /// Corners of the outline. The outline is always closed, whether or not
    /// the last corner repeats the first.
    pub vertices: Vec<Point>,
}

impl ZoneOutline {
    pub fn new(
        name: impl Into<String>,
        zone: ClimateZone,
        vertices: Vec<Point>,
    ) -> Self {
        Self {
            name: name.into(),
            zone,
            vertices,
        }
    }

    /// Create an outline, deciding its zone from its stroke color. See
    /// [ClimateZone::from_stroke_color].
    pub fn from_stroke_color(
        name: impl Into<String>,
        [r, g, b]: [u8; 3],
        vertices: Vec<Point>,
    ) -> Self {
        Self::new(name, ClimateZone::from_stroke_color(r, g, b), vertices)
    }

    /// The outline as a closed segment path
    pub fn path(&self) -> Result<Path, MapError> {
        Path::from_vertices(&self.name, &self.vertices, true)
    }

    /// The outline as a polygon, for hex containment checks
    pub fn polygon(&self) -> Polygon {
        Polygon::new(self.vertices.clone())
    }
}

/// A polygon running parallel to a zone boundary, on one side of it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneBand {
    pub class: ZoneClass,
    /// Name of the outline (or belt) this band follows
    pub source: String,
    /// Corners of the band. Bands always follow closed boundaries, so this
    /// is a closed ring.
    pub points: Vec<Point>,
}

impl ZoneBand {
    /// Label an offset pair, dropping any side without a class
    pub fn from_offsets(
        source: &str,
        offsets: OffsetPair,
        (inner_class, outer_class): (Option<ZoneClass>, Option<ZoneClass>),
    ) -> Vec<Self> {
        let OffsetPair { inner, outer } = offsets;
        [(inner_class, inner), (outer_class, outer)]
            .into_iter()
            .filter_map(|(class, points)| {
                class.map(|class| Self {
                    class,
                    source: source.to_owned(),
                    points,
                })
            })
            .collect()
    }
}

/// Classes of the bands along a fair-weather belt loop. The belt only gets
/// one band, on the side facing away from the pole: if the polar reference
/// point is inside the outer band, the belt encloses the pole and the fair
/// side is outer.
pub fn belt_classes(
    offsets: &OffsetPair,
    polar_reference: Point,
) -> (Option<ZoneClass>, Option<ZoneClass>) {
    if point_in_polygon(polar_reference, &offsets.outer) {
        (None, Some(ZoneClass::Fair))
    } else {
        (Some(ZoneClass::Fair), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::offset::offset_path;

    #[test]
    fn test_stroke_color_routing() {
        assert_eq!(
            ClimateZone::from_stroke_color(0xff, 0x00, 0x00),
            ClimateZone::Tropical
        );
        assert_eq!(
            ClimateZone::from_stroke_color(0x00, 0x80, 0x00),
            ClimateZone::NorthTemperate
        );
        assert_eq!(
            ClimateZone::from_stroke_color(0x00, 0x00, 0xff),
            ClimateZone::Polar
        );
        assert_eq!(
            ClimateZone::from_stroke_color(0xff, 0xff, 0x00),
            ClimateZone::SouthTemperate
        );
        assert_eq!(
            ClimateZone::from_stroke_color(0x80, 0x80, 0x80),
            ClimateZone::Industrialized
        );
        assert_eq!(
            ClimateZone::from_stroke_color(0, 0, 0),
            ClimateZone::Industrialized
        );
    }

    #[test]
    fn test_bands_from_offsets() {
        let outline = ZoneOutline::new(
            "tropics",
            ClimateZone::Tropical,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        );
        let offsets = offset_path(&outline.path().unwrap(), 1.0).unwrap();
        let bands = ZoneBand::from_offsets(
            &outline.name,
            offsets,
            outline.zone.band_classes(),
        );
        // Tropical zones only get an inner band
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].class, ZoneClass::Tropical);
        assert_eq!(bands[0].source, "tropics");
        assert!(bands[0].points[0].approx_eq(Point::new(1.0, 1.0), 1e-9));
    }

    #[test]
    fn test_belt_classes() {
        let belt = Path::from_vertices(
            "belt",
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            true,
        )
        .unwrap();
        let offsets = offset_path(&belt, 1.0).unwrap();
        assert_eq!(
            belt_classes(&offsets, Point::new(5.0, 5.0)),
            (None, Some(ZoneClass::Fair))
        );
        assert_eq!(
            belt_classes(&offsets, Point::new(50.0, 5.0)),
            (Some(ZoneClass::Fair), None)
        );
    }
}
