use crate::{
    error::MapError,
    geo::{line_intersection, point_in_polygon, Path, Point, Segment},
};

/// The two parallel outlines produced by offsetting a path to both sides
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetPair {
    /// The side that ends up inside the other
    pub inner: Vec<Point>,
    pub outer: Vec<Point>,
}

/// Offset a path by `distance` to both sides, with mitered corners. Each
/// edge is shifted along its normal, then every vertex becomes the
/// intersection of the two shifted edges that meet there. The ends of an
/// open path just use the shifted endpoints.
///
/// Vertex `i` of each output corresponds to the start of segment `i` (plus
/// the end of the last segment, for open paths).
pub fn offset_path(path: &Path, distance: f64) -> Result<OffsetPair, MapError> {
    let left = offset_side(path, distance)?;
    let right = offset_side(path, -distance)?;
    let left_is_inner = left
        .first()
        .map_or(false, |&point| point_in_polygon(point, &right));
    Ok(if left_is_inner {
        OffsetPair {
            inner: left,
            outer: right,
        }
    } else {
        OffsetPair {
            inner: right,
            outer: left,
        }
    })
}

/// Offset every segment along its normal. Positive distance shifts towards
/// the direction's [perpendicular](Point::perpendicular).
fn offset_side(path: &Path, distance: f64) -> Result<Vec<Point>, MapError> {
    let shifted = path
        .segments
        .iter()
        .map(|segment| {
            let length = segment.length();
            if length == 0.0 {
                return Err(MapError::degenerate(format!(
                    "can't offset zero-length segment {}",
                    segment
                )));
            }
            let normal = segment.direction().perpendicular() / length;
            Ok(segment.translate(normal * distance))
        })
        .collect::<Result<Vec<Segment>, MapError>>()?;

    let (first, last) = match (shifted.first(), shifted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(Vec::new()),
    };
    let mut points = Vec::with_capacity(shifted.len() + 1);
    if path.closed {
        points.push(miter(&last, &first)?);
    } else {
        points.push(first.start);
    }
    for pair in shifted.windows(2) {
        points.push(miter(&pair[0], &pair[1])?);
    }
    if !path.closed {
        points.push(last.end);
    }
    Ok(points)
}

/// Join two consecutive shifted edges. Edges that continue in a straight
/// line meet at the shifted shared vertex. An edge that doubles back on the
/// previous one has no sensible join.
fn miter(previous: &Segment, next: &Segment) -> Result<Point, MapError> {
    match line_intersection(previous, next) {
        Ok(point) => Ok(point),
        Err(_) if previous.direction().dot(next.direction()) > 0.0 => {
            Ok(next.start)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn assert_points_eq(actual: &[Point], expected: &[Point]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.approx_eq(*e, 1e-9), "expected {}, got {}", e, a);
        }
    }

    #[test]
    fn test_offset_square() {
        let square = points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let path = Path::from_vertices("square", &square, true).unwrap();
        let pair = offset_path(&path, 1.0).unwrap();
        assert_points_eq(
            &pair.inner,
            &points(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]),
        );
        assert_points_eq(
            &pair.outer,
            &points(&[(-1.0, -1.0), (5.0, -1.0), (5.0, 5.0), (-1.0, 5.0)]),
        );
    }

    #[test]
    fn test_offset_is_perpendicular() {
        // A sloped edge is shifted by the full distance, not just vertically
        let path = Path::from_vertices(
            "line",
            &points(&[(0.0, 0.0), (3.0, 4.0)]),
            false,
        )
        .unwrap();
        let side = offset_side(&path, 5.0).unwrap();
        assert_eq!(side.len(), 2);
        assert_approx_eq!(side[0].x, -4.0);
        assert_approx_eq!(side[0].y, 3.0);
        assert_approx_eq!(side[1].x, -1.0);
        assert_approx_eq!(side[1].y, 7.0);
        let original = path.segments[0];
        for point in side {
            assert_approx_eq!(original.distance_to(point), 5.0);
        }
    }

    #[test]
    fn test_open_path_ends() {
        // An L shape, with vertical edges
        let path = Path::from_vertices(
            "corner",
            &points(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0)]),
            false,
        )
        .unwrap();
        let side = offset_side(&path, 1.0).unwrap();
        assert_points_eq(
            &side,
            &points(&[(-1.0, 0.0), (-1.0, 5.0), (4.0, 5.0)]),
        );
    }

    #[test]
    fn test_round_trip() {
        let hexagon = points(&[
            (1.0, 0.0),
            (0.0, 1.0),
            (1.0, 2.0),
            (3.0, 2.0),
            (4.0, 1.0),
            (3.0, 0.0),
        ]);
        let path = Path::from_vertices("hexagon", &hexagon, true).unwrap();
        let r = 0.25;
        let grown = offset_path(&path, r).unwrap().outer;
        let grown = Path::from_vertices("grown", &grown, true).unwrap();
        let restored = offset_path(&grown, r).unwrap().inner;
        assert_points_eq(&restored, &hexagon);
    }

    #[test]
    fn test_collinear_vertex() {
        // Middle vertex is on a straight line, so it just gets shifted
        let path = Path::from_vertices(
            "straight",
            &points(&[(0.0, 0.0), (2.0, 0.0), (5.0, 0.0)]),
            false,
        )
        .unwrap();
        let side = offset_side(&path, 1.0).unwrap();
        assert_points_eq(
            &side,
            &points(&[(0.0, 1.0), (2.0, 1.0), (5.0, 1.0)]),
        );
    }

    #[test]
    fn test_reversal_is_degenerate() {
        let path = Path::from_vertices(
            "spike",
            &points(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)]),
            false,
        )
        .unwrap();
        assert!(matches!(
            offset_side(&path, 1.0),
            Err(MapError::GeometryDegenerate { .. })
        ));
    }
}
