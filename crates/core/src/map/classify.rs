use crate::{
    config::MapConfig,
    geo::{point_in_polygon, ring_edges, BoundingBox, Polygon},
    map::{
        hex::{sides, Hex},
        lattice::HexLattice,
    },
};

/// How much of a hex a region polygon covers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Containment {
    /// The polygon covers at least some of the hex
    pub partly: bool,
    /// The polygon covers the hex and its outline never crosses into it
    pub completely: bool,
}

impl Containment {
    /// Covered, but the region's edge runs through the hex
    pub fn is_boundary(&self) -> bool {
        self.partly && !self.completely
    }
}

/// Decides how region polygons cover hexes, and turns that into per-side
/// land/sea adjacency. All the tolerances are derived from the lattice, so
/// the same classifier works at any drawing scale.
#[derive(Copy, Clone, Debug)]
pub struct HexClassifier {
    /// Samples closer than this to a hex's outline are treated as lying on
    /// it, not inside it
    epsilon: f64,
    /// Any sample further than this from a hex's center can't be inside it
    hex_height: f64,
}

impl HexClassifier {
    pub fn new(lattice: &HexLattice, config: &MapConfig) -> Self {
        Self::with_tolerance(
            lattice.hex_height(),
            lattice.hex_width() / config.epsilon_divisor,
        )
    }

    pub fn with_tolerance(hex_height: f64, epsilon: f64) -> Self {
        Self {
            epsilon,
            hex_height,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Cheap pre-filter: can this polygon possibly touch this hex? Only
    /// compares bounding boxes.
    pub fn is_nearby(&self, hex: &Hex, polygon: &Polygon) -> bool {
        let hex_bbox: BoundingBox = hex.vertices().iter().collect();
        hex_bbox.intersects(polygon.bbox())
    }

    /// Does the polygon's outline cross the interior of the hex? True if any
    /// sampled outline point is strictly inside the hex outline. Samples
    /// within epsilon of the hex outline don't count, so a region drawn
    /// exactly along hex edges doesn't pass through the hexes it borders.
    pub fn passes_through(&self, hex: &Hex, polygon: &Polygon) -> bool {
        let center = hex.center();
        let vertices = hex.vertices();
        polygon.points().iter().any(|&point| {
            // Distance check is just a fast reject
            point.distance_to(center) < self.hex_height
                && point_in_polygon(point, vertices)
                && ring_edges(vertices)
                    .all(|edge| edge.distance_to(point) >= self.epsilon)
        })
    }

    /// Check how much of a hex a region polygon covers
    pub fn classify(&self, hex: &Hex, polygon: &Polygon) -> Containment {
        if !self.is_nearby(hex, polygon) {
            return Containment::default();
        }
        let center_inside = polygon.contains(hex.center());
        let passes_through = self.passes_through(hex, polygon);
        Containment {
            partly: center_inside || passes_through,
            completely: center_inside && !passes_through,
        }
    }

    /// For each side of the hex, count how many of its two end vertices are
    /// inside the polygon, plus optionally its midpoint
    fn side_votes(hex: &Hex, polygon: &Polygon, with_midpoint: bool) -> [u8; 6] {
        let vertex_inside: Vec<bool> = hex
            .vertices()
            .iter()
            .map(|&vertex| polygon.contains(vertex))
            .collect();
        let mut votes = [0; 6];
        for side in sides() {
            let (previous, this) = side.vertex_indices();
            let mut count =
                vertex_inside[previous] as u8 + vertex_inside[this] as u8;
            if with_midpoint && polygon.contains(hex.side_midpoint(side)) {
                count += 1;
            }
            votes[side.index()] = count;
        }
        votes
    }

    /// Mark a hex as (partly) land based on a land region polygon. A fully
    /// covered hex becomes all land. A boundary hex becomes coastal, and each
    /// of its sides is voted on by its two vertices and midpoint: one land
    /// vote makes the side border land, three clear its sea adjacency.
    pub fn apply_land(&self, hex: &mut Hex, polygon: &Polygon) -> Containment {
        let containment = self.classify(hex, polygon);
        if containment.completely {
            hex.fill_land();
        } else if containment.partly {
            hex.is_land = true;
            let votes = Self::side_votes(hex, polygon, true);
            for side in sides() {
                let votes = votes[side.index()];
                if votes >= 1 {
                    hex.adjacent_land.set(side, true);
                }
                if votes >= 3 {
                    hex.adjacent_sea.set(side, false);
                }
            }
        }
        containment
    }

    /// Mark a hex as (partly) sea based on a water region polygon inside
    /// land, e.g. a lake. The mirror of [Self::apply_land], except sides only
    /// get two votes (no midpoint): one marks the side as bordering sea, two
    /// clear its land adjacency.
    pub fn apply_sea(&self, hex: &mut Hex, polygon: &Polygon) -> Containment {
        let containment = self.classify(hex, polygon);
        if containment.completely {
            hex.fill_sea();
        } else if containment.partly {
            hex.is_sea = true;
            let votes = Self::side_votes(hex, polygon, false);
            for side in sides() {
                let votes = votes[side.index()];
                if votes >= 1 {
                    hex.adjacent_sea.set(side, true);
                }
                if votes >= 2 {
                    hex.adjacent_land.set(side, false);
                }
            }
        }
        containment
    }
}
