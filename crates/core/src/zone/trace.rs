use crate::{
    error::MapError,
    geo::{segments_equal, Path, Point, Segment},
};
use log::{debug, trace};

/// Position of one segment within a pair of region sets
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct SegmentRef {
    /// 0 for set A, 1 for set B
    set: usize,
    /// Which polygon within the set
    ring: usize,
    /// Which segment within the polygon
    index: usize,
}

/// Finds the boundary of an undrawn region that sits between two drawn
/// region sets. The sets share some edges (where they border each other);
/// every edge of A or B that isn't shared is part of the boundary.
///
/// Each set is a list of closed paths. Walking stays within one path until
/// it hits a shared edge, then hops over to the other set and carries on
/// from the same junction point.
#[derive(Copy, Clone, Debug)]
pub struct BoundaryTracer {
    epsilon: f64,
}

impl BoundaryTracer {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Trace every boundary loop between the two sets. Each output path is
    /// closed, and its segments are in walking order. Returns
    /// [MapError::UnterminatedTrace] if a loop can't be closed, which
    /// generally means the shared edges don't line up.
    pub fn trace(&self, a: &[Path], b: &[Path]) -> Result<Vec<Path>, MapError> {
        let sets = [a, b];
        let total: usize = a.iter().chain(b).map(Path::len).sum();
        let mut loops: Vec<Path> = Vec::new();

        while let Some(start) = self.next_start(&sets, &loops) {
            let boundary = self.trace_loop(&sets, start, total * 2)?;
            debug!(
                "Traced boundary loop of {} segments from {}",
                boundary.len(),
                get(&sets, start)
            );
            loops.push(boundary);
        }
        Ok(loops)
    }

    /// Find a segment of A that isn't shared with B and isn't already part
    /// of a loop
    fn next_start(
        &self,
        sets: &[&[Path]; 2],
        loops: &[Path],
    ) -> Option<SegmentRef> {
        for (ring, path) in sets[0].iter().enumerate() {
            for (index, segment) in path.segments.iter().enumerate() {
                let reference = SegmentRef {
                    set: 0,
                    ring,
                    index,
                };
                let used = loops
                    .iter()
                    .flat_map(|boundary| &boundary.segments)
                    .any(|other| segments_equal(segment, other, self.epsilon));
                if !used && self.find_shared(sets, reference).is_none() {
                    return Some(reference);
                }
            }
        }
        None
    }

    /// Find the copy of a segment in the opposite set, if it has one
    fn find_shared(
        &self,
        sets: &[&[Path]; 2],
        reference: SegmentRef,
    ) -> Option<SegmentRef> {
        let segment = get(sets, reference);
        let set = 1 - reference.set;
        sets[set].iter().enumerate().find_map(|(ring, path)| {
            path.segments
                .iter()
                .position(|other| segments_equal(&segment, other, self.epsilon))
                .map(|index| SegmentRef { set, ring, index })
        })
    }

    fn trace_loop(
        &self,
        sets: &[&[Path]; 2],
        start: SegmentRef,
        budget: usize,
    ) -> Result<Path, MapError> {
        let mut current = start;
        let mut forward = true;
        // Where the last emitted segment ended, in walking order
        let mut junction: Option<Point> = None;
        let mut segments: Vec<Segment> = Vec::new();

        for step in 0..budget {
            if step > 0 && current == start {
                if let (Some(first), Some(last)) =
                    (segments.first().copied(), segments.last_mut())
                {
                    // Snap the loop shut so it closes exactly
                    last.end = first.start;
                }
                return Ok(Path {
                    segments,
                    closed: true,
                });
            }

            let segment = get(sets, current);
            match (self.find_shared(sets, current), junction) {
                (Some(shared), Some(junction)) => {
                    // The border between the sets starts here, so follow
                    // the other set away from the junction
                    let other = get(sets, shared);
                    let len = sets[shared.set][shared.ring].len();
                    forward = if other.end.approx_eq(junction, self.epsilon) {
                        true
                    } else if other.start.approx_eq(junction, self.epsilon) {
                        false
                    } else {
                        break;
                    };
                    current = SegmentRef {
                        index: step_index(shared.index, len, forward),
                        ..shared
                    };
                    trace!("Crossed over at {} to {:?}", junction, current);
                }
                // The start is never shared, so there's always a junction
                // by the time we hit a shared edge
                (Some(_), None) => break,
                (None, _) => {
                    let oriented = if forward {
                        segment
                    } else {
                        segment.reversed()
                    };
                    segments.push(oriented);
                    junction = Some(oriented.end);
                    let len = sets[current.set][current.ring].len();
                    current.index = step_index(current.index, len, forward);
                }
            }
        }

        Err(MapError::UnterminatedTrace {
            start: get(sets, start),
            steps: budget,
        })
    }
}

fn get(sets: &[&[Path]; 2], reference: SegmentRef) -> Segment {
    sets[reference.set][reference.ring].segments[reference.index]
}

/// Move one step around a ring, in either direction
fn step_index(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
