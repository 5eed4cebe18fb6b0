use crate::geo::{Point, Segment};
use thiserror::Error;

/// Every way a map compilation can fail. None of these are recoverable within
/// a single run: a failure means the source drawing has to be fixed. Each
/// variant carries enough context (coordinates, names) to find the problem in
/// the drawing.
///
/// Geometry primitives return these directly. The higher-level pipeline wraps
/// them in [anyhow::Error] with context about which pass/region failed, so use
/// [anyhow::Error::downcast_ref] to get back to the variant.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MapError {
    /// An intersection or offset was requested for lines that don't define
    /// one, e.g. parallel lines or a zero-length edge.
    #[error("degenerate geometry: {reason}")]
    GeometryDegenerate { reason: String },

    /// Boundary tracing couldn't close a loop. This happens when the shared
    /// edges of two region sets don't line up within epsilon.
    #[error(
        "boundary trace starting at {start} did not close after {steps} steps"
    )]
    UnterminatedTrace { start: Segment, steps: usize },

    /// A hex info label doesn't match the lattice, e.g. it sits outside every
    /// hex or shares a hex with another label.
    #[error("inconsistent hex label at {position}: {reason}")]
    InconsistentLabel { position: Point, reason: String },

    /// A region's drawn geometry can't be used, e.g. a zero-length curve or a
    /// polygon with too few points to form a segment list.
    #[error("malformed region data in {region}: {reason}")]
    MalformedRegionData { region: String, reason: String },
}

impl MapError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::GeometryDegenerate {
            reason: reason.into(),
        }
    }

    pub(crate) fn label(position: Point, reason: impl Into<String>) -> Self {
        Self::InconsistentLabel {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(
        region: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRegionData {
            region: region.into(),
            reason: reason.into(),
        }
    }
}
