//! Planar geometry primitives. Everything here lives in the single flat 2D
//! coordinate space of the source drawing, where y grows downward. No
//! projection happens anywhere in this crate.

pub mod curve;

use crate::error::MapError;
use derive_more::{Add, AddAssign, Display, Div, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A point (or vector) in drawing space.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    AddAssign,
    SubAssign,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points
    pub fn distance_to(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// Length of this point when treated as a vector from the origin
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product. Positive when `other` is
    /// counterclockwise from `self` in a y-up system (clockwise on screen).
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn midpoint(self, other: Point) -> Point {
        (self + other) / 2.0
    }

    /// This vector rotated a quarter turn
    pub fn perpendicular(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Check if two points are within `epsilon` of each other
    pub fn approx_eq(self, other: Point, epsilon: f64) -> bool {
        self.distance_to(other) < epsilon
    }
}

impl From<lyon_geom::Point<f64>> for Point {
    fn from(point: lyon_geom::Point<f64>) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Point> for lyon_geom::Point<f64> {
    fn from(point: Point) -> Self {
        lyon_geom::point(point.x, point.y)
    }
}

/// A straight edge between two points. The endpoints are ordered, which
/// matters for traversal and offsetting, but equality under tolerance (see
/// [segments_equal]) ignores direction.
#[derive(Copy, Clone, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(fmt = "[{} -> {}]", start, end)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    pub fn direction(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// The same edge, walked the other way
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Shift both endpoints by the same vector
    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Shortest distance from a point to any point on this segment
    pub fn distance_to(&self, point: Point) -> f64 {
        let direction = self.direction();
        let length_sq = direction.dot(direction);
        if length_sq == 0.0 {
            return self.start.distance_to(point);
        }
        let t = ((point - self.start).dot(direction) / length_sq).clamp(0.0, 1.0);
        (self.start + direction * t).distance_to(point)
    }
}

/// An ordered chain of segments, where each segment starts where the previous
/// one ended. If `closed` is set, the last segment is the closing edge back
/// to the start of the first one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Path {
    /// Build a path through a list of vertices. For closed paths, a closing
    /// edge is appended unless the last vertex already repeats the first.
    /// Zero-length edges (repeated vertices) are dropped. Returns an error
    /// if the vertices don't produce a single usable segment.
    pub fn from_vertices(
        region: &str,
        vertices: &[Point],
        closed: bool,
    ) -> Result<Self, MapError> {
        let mut segments: Vec<Segment> = vertices
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect();
        if closed {
            if let (Some(first), Some(last)) = (vertices.first(), vertices.last())
            {
                segments.push(Segment::new(*last, *first));
            }
        }
        segments.retain(|segment| segment.length() > 0.0);

        if segments.is_empty() {
            return Err(MapError::malformed(
                region,
                format!(
                    "{} vertices are too few to form a segment list",
                    vertices.len()
                ),
            ));
        }
        Ok(Self { segments, closed })
    }

    /// The vertex sequence of this path. For an open path this includes the
    /// end of the last segment, for a closed path it doesn't (it would just
    /// repeat the first vertex).
    pub fn vertices(&self) -> Vec<Point> {
        let mut vertices: Vec<Point> =
            self.segments.iter().map(|segment| segment.start).collect();
        if !self.closed {
            if let Some(last) = self.segments.last() {
                vertices.push(last.end);
            }
        }
        vertices
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Axis-aligned bounds of a set of points. Used as a cheap rejection test
/// before doing exact geometry.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds that contain nothing. Extending this with a point gives the
    /// bounds of exactly that point.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Grow the bounds to include the given point
    pub fn extend(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    /// Inclusive containment check
    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x)
            && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Do the two boxes overlap at all? Touching edges count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

impl<'a> FromIterator<&'a Point> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = &'a Point>>(iter: I) -> Self {
        let mut bbox = Self::EMPTY;
        for point in iter {
            bbox.extend(*point);
        }
        bbox
    }
}

/// A closed (implicitly: the last point connects back to the first) ring of
/// points approximating some region outline. The bounding box is computed
/// once at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
    bbox: BoundingBox,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        let bbox = points.iter().collect();
        Self { points, bbox }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point-in-polygon test, with a bounding box pre-check
    pub fn contains(&self, point: Point) -> bool {
        self.bbox.contains(point) && point_in_polygon(point, &self.points)
    }
}

/// Iterate over the edges of a ring of points, including the closing edge
/// from the last point back to the first.
pub fn ring_edges(points: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    let n = points.len();
    (0..n).map(move |i| Segment::new(points[(i + n - 1) % n], points[i]))
}

/// Crossing-number test: cast a ray from the point towards +x and count how
/// many edges it crosses. The polygon is treated as closed. Points exactly on
/// an edge land on whichever side the half-open `y` comparison puts them,
/// which is fine because sampling already introduces more error than that.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    for edge in ring_edges(polygon) {
        let (a, b) = (edge.end, edge.start);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
    }
    inside
}

/// Intersection of the two infinite lines through the given segments. Lines
/// are handled as point + direction, so any orientation (including vertical)
/// works. Returns an error for parallel lines or zero-length segments, since
/// those don't have a single intersection.
pub fn line_intersection(l1: &Segment, l2: &Segment) -> Result<Point, MapError> {
    let d1 = l1.direction();
    let d2 = l2.direction();
    let scale = d1.length() * d2.length();
    let denominator = d1.cross(d2);
    // Relative threshold, so it works the same at any drawing scale
    if scale == 0.0 || denominator.abs() <= scale * 1e-12 {
        return Err(MapError::degenerate(format!(
            "lines through {} and {} have no single intersection",
            l1, l2
        )));
    }
    let t = (l2.start - l1.start).cross(d2) / denominator;
    Ok(l1.start + d1 * t)
}

/// Two segments are equal if their endpoints match within `epsilon`, in
/// either orientation.
pub fn segments_equal(s1: &Segment, s2: &Segment, epsilon: f64) -> bool {
    (s1.start.approx_eq(s2.start, epsilon) && s1.end.approx_eq(s2.end, epsilon))
        || (s1.start.approx_eq(s2.end, epsilon)
            && s1.end.approx_eq(s2.start, epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]
    }

    #[test]
    fn test_point_in_polygon() {
        let square = square();
        assert!(point_in_polygon(Point::new(1.0, 1.0), &square));
        assert!(point_in_polygon(Point::new(0.1, 1.9), &square));
        assert!(!point_in_polygon(Point::new(2.1, 1.0), &square));
        assert!(!point_in_polygon(Point::new(1.0, -0.1), &square));

        // Concave shape: the notch isn't inside
        let notched = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(0.0, 3.0),
        ];
        assert!(point_in_polygon(Point::new(0.5, 2.0), &notched));
        assert!(!point_in_polygon(Point::new(1.5, 2.0), &notched));
        assert!(point_in_polygon(Point::new(1.5, 0.5), &notched));
    }

    #[test]
    fn test_outside_bbox_is_outside() {
        let polygon = Polygon::new(vec![
            Point::new(-1.0, 4.0),
            Point::new(5.0, -2.0),
            Point::new(7.0, 3.0),
            Point::new(2.0, 9.0),
        ]);
        let bbox = *polygon.bbox();
        let outside = [
            Point::new(bbox.min_x - 0.01, 3.0),
            Point::new(bbox.max_x + 0.01, 3.0),
            Point::new(2.0, bbox.min_y - 0.01),
            Point::new(2.0, bbox.max_y + 0.01),
            Point::new(100.0, -100.0),
        ];
        for point in outside {
            assert!(!polygon.contains(point), "{} should be outside", point);
            assert!(!point_in_polygon(point, polygon.points()));
        }
    }

    #[test]
    fn test_line_intersection() {
        let l1 = Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let l2 = Segment::new(Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        let p = line_intersection(&l1, &l2).unwrap();
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.y, 1.0);

        // Vertical lines are fine with the vector representation
        let vertical = Segment::new(Point::new(3.0, -1.0), Point::new(3.0, 1.0));
        let p = line_intersection(&l1, &vertical).unwrap();
        assert_approx_eq!(p.x, 3.0);
        assert_approx_eq!(p.y, 3.0);

        // Lines meet outside both segments
        let horizontal =
            Segment::new(Point::new(10.0, 5.0), Point::new(11.0, 5.0));
        let p = line_intersection(&vertical, &horizontal).unwrap();
        assert_approx_eq!(p.x, 3.0);
        assert_approx_eq!(p.y, 5.0);
    }

    #[test]
    fn test_line_intersection_parallel() {
        let l1 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let l2 = Segment::new(Point::new(0.0, 1.0), Point::new(3.0, 4.0));
        assert!(matches!(
            line_intersection(&l1, &l2),
            Err(MapError::GeometryDegenerate { .. })
        ));
        let point = Segment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert!(line_intersection(&l1, &point).is_err());
    }

    #[test]
    fn test_segments_equal() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let close = Segment::new(Point::new(0.005, 0.0), Point::new(1.0, 0.005));
        assert!(segments_equal(&s, &close, 0.01));
        assert!(segments_equal(&s, &close.reversed(), 0.01));
        assert!(!segments_equal(&s, &close, 0.001));
        let other = Segment::new(Point::new(1.0, 0.0), Point::new(1.0, 1.0));
        assert!(!segments_equal(&s, &other, 0.01));
    }

    #[test]
    fn test_path_from_vertices() {
        let path = Path::from_vertices("square", &square(), true).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.segments[3].end, Point::new(0.0, 0.0));
        assert_eq!(path.vertices(), square());

        // A repeated closing vertex doesn't produce a zero-length edge
        let mut repeated = square();
        repeated.push(Point::new(0.0, 0.0));
        let path = Path::from_vertices("square", &repeated, true).unwrap();
        assert_eq!(path.len(), 4);

        let open = Path::from_vertices("line", &square(), false).unwrap();
        assert_eq!(open.len(), 3);
        assert_eq!(open.vertices().len(), 4);

        let err = Path::from_vertices("dot", &[Point::new(1.0, 1.0)], true)
            .unwrap_err();
        assert!(matches!(err, MapError::MalformedRegionData { .. }));
    }

    #[test]
    fn test_segment_distance() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert_approx_eq!(s.distance_to(Point::new(2.0, 3.0)), 3.0);
        assert_approx_eq!(s.distance_to(Point::new(-3.0, 4.0)), 5.0);
        assert_approx_eq!(s.distance_to(Point::new(1.0, 0.0)), 0.0);
    }
}
