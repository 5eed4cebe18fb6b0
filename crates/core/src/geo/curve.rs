//! Parametric curves, and sampling them down into polygons. The drawing
//! parser (which lives outside this crate) hands us curves; everything
//! downstream only ever sees sampled [Polygon]s.

use crate::{
    error::MapError,
    geo::{BoundingBox, Point, Polygon},
};
use lyon_geom::{
    CubicBezierSegment, LineSegment, QuadraticBezierSegment, Segment as _,
};
use std::cell::{Ref, RefCell};

/// Anything that can be measured and evaluated along its length. `t` runs
/// from 0 (start of the curve) to 1 (end of the curve). `precision` is the
/// maximum error the caller will tolerate, in drawing units.
pub trait Curve {
    /// Total length of the curve
    fn length(&self, precision: f64) -> f64;

    /// The point at fraction `t` of the curve
    fn point(&self, t: f64, precision: f64) -> Point;
}

/// One piece of a [PathCurve]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathSegment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
}

impl PathSegment {
    pub fn line(from: Point, to: Point) -> Self {
        Self::Line(LineSegment {
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn quadratic(from: Point, ctrl: Point, to: Point) -> Self {
        Self::Quadratic(QuadraticBezierSegment {
            from: from.into(),
            ctrl: ctrl.into(),
            to: to.into(),
        })
    }

    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self::Cubic(CubicBezierSegment {
            from: from.into(),
            ctrl1: ctrl1.into(),
            ctrl2: ctrl2.into(),
            to: to.into(),
        })
    }

    fn length(&self, precision: f64) -> f64 {
        match self {
            Self::Line(segment) => segment.length(),
            Self::Quadratic(segment) => segment.approximate_length(precision),
            Self::Cubic(segment) => segment.approximate_length(precision),
        }
    }

    /// Evaluate at the segment's own curve parameter (not arc length)
    fn sample(&self, t: f64) -> Point {
        match self {
            Self::Line(segment) => segment.sample(t),
            Self::Quadratic(segment) => segment.sample(t),
            Self::Cubic(segment) => segment.sample(t),
        }
        .into()
    }
}

/// A drawn outline: a chain of lines and Bézier segments, as it comes out of
/// the drawing. A point at `t` is found by locating the segment that covers
/// fraction `t` of the total length, then evaluating that segment at the
/// matching local parameter.
#[derive(Debug)]
pub struct PathCurve {
    segments: Vec<PathSegment>,
    /// Cumulative segment lengths, for the precision they were measured at.
    /// Sampling asks for the same precision over and over, so this saves
    /// re-measuring every segment for every sample.
    measured: RefCell<Option<(f64, Vec<f64>)>>,
}

impl PathCurve {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self {
            segments,
            measured: RefCell::new(None),
        }
    }

    /// A curve made of straight lines through the given points. If `closed`
    /// is set, a final line connects the last point back to the first.
    pub fn polyline(points: &[Point], closed: bool) -> Self {
        let mut segments: Vec<PathSegment> = points
            .windows(2)
            .map(|pair| PathSegment::line(pair[0], pair[1]))
            .collect();
        if closed && points.len() > 1 {
            segments.push(PathSegment::line(points[points.len() - 1], points[0]));
        }
        Self::new(segments)
    }

    /// Get the running total of segment lengths, measuring (and caching)
    /// them if the cache is missing or was taken at another precision.
    fn cumulative_lengths(&self, precision: f64) -> Ref<'_, [f64]> {
        let stale = !matches!(
            &*self.measured.borrow(),
            Some((cached_precision, _)) if *cached_precision == precision
        );
        if stale {
            let mut total = 0.0;
            let lengths: Vec<f64> = self
                .segments
                .iter()
                .map(|segment| {
                    total += segment.length(precision);
                    total
                })
                .collect();
            *self.measured.borrow_mut() = Some((precision, lengths));
        }
        Ref::map(self.measured.borrow(), |measured| match measured {
            Some((_, lengths)) => lengths.as_slice(),
            None => &[][..],
        })
    }
}

impl Curve for PathCurve {
    fn length(&self, precision: f64) -> f64 {
        self.cumulative_lengths(precision)
            .last()
            .copied()
            .unwrap_or(0.0)
    }

    fn point(&self, t: f64, precision: f64) -> Point {
        let lengths = self.cumulative_lengths(precision);
        let total = match lengths.last() {
            Some(total) if *total > 0.0 => *total,
            // Nothing to measure against, so just use the start (if any)
            _ => {
                return self
                    .segments
                    .first()
                    .map(|segment| segment.sample(0.0))
                    .unwrap_or_default()
            }
        };

        let target = t.clamp(0.0, 1.0) * total;
        let mut segment_start = 0.0;
        for (segment, &segment_end) in self.segments.iter().zip(lengths.iter())
        {
            if target <= segment_end && segment_end > segment_start {
                let local = (target - segment_start) / (segment_end - segment_start);
                return segment.sample(local);
            }
            segment_start = segment_end;
        }
        // Only reachable through float error at t=1
        self.segments[self.segments.len() - 1].sample(1.0)
    }
}

impl Polygon {
    /// Sample a curve into a polygon, stepping `t` from 0 in increments of
    /// `resolution / length`. Each point is evaluated with a precision of
    /// half the resolution. The output always starts at the curve's start
    /// point, and consecutive points are roughly `resolution` apart.
    ///
    /// Returns an error for a zero-length curve, since there's no sensible
    /// step size to walk it with. `region` is only used for error context.
    pub fn sample(
        region: &str,
        curve: &impl Curve,
        resolution: f64,
    ) -> Result<Self, MapError> {
        let precision = resolution / 2.0;
        let length = curve.length(precision);
        if !(length > 0.0) || !length.is_finite() {
            return Err(MapError::malformed(
                region,
                format!("curve has unusable length {}", length),
            ));
        }

        let step = resolution / length;
        let num_samples = (1.0 / step).ceil() as usize;
        let mut points = Vec::with_capacity(num_samples);
        let mut bbox = BoundingBox::EMPTY;
        for i in 0..num_samples {
            let t = i as f64 * step;
            if t >= 1.0 {
                break;
            }
            let point = curve.point(t, precision);
            bbox.extend(point);
            points.push(point);
        }

        Ok(Self { points, bbox })
    }
}
