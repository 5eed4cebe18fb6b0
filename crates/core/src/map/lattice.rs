use crate::{
    error::MapError,
    geo::Point,
    map::hex::{Hex, HexPoint},
};
use log::debug;
use serde::{Deserialize, Serialize};

/// The hex grid laid over the drawing. Hexes have flat tops and bottoms, and
/// columns are brick-offset: odd columns sit half a row lower than even ones.
///
/// ```text
///   ____        ____
///  /    \      /    \
/// / 0,0  \____/ 2,0  \
/// \      /    \      /
///  \____/ 1,0  \____/
///  /    \      /    \
/// / 0,1  \____/ 2,1  \
/// ```
///
/// `hex_width` is the horizontal distance between the left corners of two
/// neighboring columns. A hex's full width is 4/3 of that, since neighboring
/// columns overlap by one third. `hex_height` is the full height of one hex.
///
/// The lattice is built once and never changes. Classification passes only
/// mutate the [Hex]es it creates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLattice {
    /// Top-left corner of the lattice in drawing space
    origin: Point,
    hex_width: f64,
    hex_height: f64,
    /// Number of columns
    width: u16,
    /// Number of rows
    height: u16,
}

impl HexLattice {
    pub fn new(
        origin: Point,
        hex_width: f64,
        hex_height: f64,
        width: u16,
        height: u16,
    ) -> Self {
        Self {
            origin,
            hex_width,
            hex_height,
            width,
            height,
        }
    }

    /// Derive the lattice from the outline of the background (ocean) region.
    /// The outline is expected to trace the jagged outer edge of the hex
    /// grid, as a list of its corner points (no repeated closing point
    /// needed). This relies on a fixed convention for how that outline is
    /// drawn:
    ///
    /// - The two corners on either side of the topmost corner are one
    ///   `hex_width` apart horizontally
    /// - The corner after the rightmost corner is half a hex lower
    /// - The corner after the rightmost corner is the right edge of the last
    ///   column, and the higher of the two neighbors of the bottommost corner
    ///   is the bottom of the last full row
    ///
    /// Where several corners tie for an extreme, the first one wins.
    pub fn from_outline(outline: &[Point]) -> Result<Self, MapError> {
        let outline = match outline {
            [first, rest @ .., last] if first == last => {
                // Drop the explicit closing point so neighbors wrap correctly
                &outline[..rest.len() + 1]
            }
            _ => outline,
        };
        let n = outline.len();
        if n < 3 {
            return Err(MapError::malformed(
                "ocean",
                format!("outline needs at least 3 corners, got {}", n),
            ));
        }
        // Neighbor lookup that wraps around the ring
        let at = |i: usize, delta: isize| -> Point {
            outline[(i as isize + delta).rem_euclid(n as isize) as usize]
        };
        let first_extreme = |key: fn(&Point) -> f64, max: bool| -> usize {
            let mut best = 0;
            for (i, point) in outline.iter().enumerate() {
                let better = if max {
                    key(point) > key(&outline[best])
                } else {
                    key(point) < key(&outline[best])
                };
                if better {
                    best = i;
                }
            }
            best
        };

        let i_min_y = first_extreme(|p| p.y, false);
        let i_max_x = first_extreme(|p| p.x, true);
        let i_max_y = first_extreme(|p| p.y, true);
        let min_x = outline.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = outline[i_min_y].y;

        let hex_width = (at(i_min_y, -1).x - at(i_min_y, 1).x).abs();
        let hex_height = (at(i_max_x, 1).y - at(i_max_x, 0).y).abs() * 2.0;
        if !(hex_width > 0.0 && hex_height > 0.0) {
            return Err(MapError::malformed(
                "ocean",
                format!(
                    "outline gives a degenerate hex size {}x{}",
                    hex_width, hex_height
                ),
            ));
        }

        let columns = ((at(i_max_x, 1).x - min_x) / hex_width).round();
        let bottom = at(i_max_y, 1).y.min(at(i_max_y, -1).y);
        let rows = ((bottom - min_y) / hex_height).round();
        let in_range = |v: f64| v >= 1.0 && v <= u16::MAX as f64;
        if !in_range(columns) || !in_range(rows) {
            return Err(MapError::malformed(
                "ocean",
                format!("outline gives an unusable grid of {}x{}", columns, rows),
            ));
        }

        let lattice = Self::new(
            Point::new(min_x, min_y),
            hex_width,
            hex_height,
            columns as u16,
            rows as u16,
        );
        debug!("Derived lattice from ocean outline: {:?}", lattice);
        Ok(lattice)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn hex_width(&self) -> f64 {
        self.hex_width
    }

    pub fn hex_height(&self) -> f64 {
        self.hex_height
    }

    /// Number of columns
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of hexes
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the drawing area covered by the lattice, as `(width,
    /// height)`. This includes the overhang of the last column and the
    /// half-row drop of odd columns.
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            self.hex_width * (self.width as f64 + 1.0 / 3.0),
            self.hex_height * (self.height as f64 + 0.5),
        )
    }

    /// Does the lattice have a hex at this position?
    pub fn contains(&self, position: HexPoint) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Index of a position in [Self::hexes]. Hexes are stored column by
    /// column, top to bottom within each column.
    pub fn index(&self, position: HexPoint) -> Option<usize> {
        if self.contains(position) {
            Some(position.x as usize * self.height as usize + position.y as usize)
        } else {
            None
        }
    }

    /// Convert a fractional column/row into drawing space
    fn to_drawing(&self, column: f64, row: f64) -> Point {
        Point::new(
            self.origin.x + column * self.hex_width,
            self.origin.y + row * self.hex_height,
        )
    }

    /// Vertical shift of a column, in rows
    fn column_offset(x: u16) -> f64 {
        (x % 2) as f64 * 0.5
    }

    /// Corners of the hex at a position. See [HexSide](crate::HexSide) for
    /// the vertex order.
    pub fn vertices(&self, position: HexPoint) -> [Point; 6] {
        let x = position.x as f64;
        let y = position.y as f64 + Self::column_offset(position.x);
        [
            self.to_drawing(x + 1.0 / 3.0, y),
            self.to_drawing(x, y + 0.5),
            self.to_drawing(x + 1.0 / 3.0, y + 1.0),
            self.to_drawing(x + 1.0, y + 1.0),
            self.to_drawing(x + 4.0 / 3.0, y + 0.5),
            self.to_drawing(x + 1.0, y),
        ]
    }

    /// Center of the hex at a position
    pub fn center(&self, position: HexPoint) -> Point {
        let x = position.x as f64;
        let y = position.y as f64 + Self::column_offset(position.x);
        self.to_drawing(x + 2.0 / 3.0, y + 0.5)
    }

    /// The jagged outer edge of the lattice, starting from the left corner
    /// of hex (0, 0) and going clockwise. This is the outline
    /// [Self::from_outline] expects, so the two round trip.
    pub fn outline(&self) -> Vec<Point> {
        let (width, height) = (self.width as f64, self.height as f64);
        let offset = |x: u16| Self::column_offset(x);
        let mut points = vec![self.to_drawing(0.0, 0.5)];

        // Top edge, left to right
        for x in 0..self.width {
            let column = x as f64;
            points.push(self.to_drawing(column + 1.0 / 3.0, offset(x)));
            points.push(self.to_drawing(column + 1.0, offset(x)));
        }
        // Right edge, down the last column
        let last = offset(self.width.saturating_sub(1));
        for y in 0..self.height {
            let row = y as f64 + last;
            points.push(self.to_drawing(width + 1.0 / 3.0, row + 0.5));
            if y + 1 < self.height {
                points.push(self.to_drawing(width, row + 1.0));
            }
        }
        // Bottom edge, right to left
        for x in (0..self.width).rev() {
            let column = x as f64;
            let bottom = height + offset(x);
            points.push(self.to_drawing(column + 1.0, bottom));
            points.push(self.to_drawing(column + 1.0 / 3.0, bottom));
        }
        // Left edge, up the first column
        for y in (1..self.height).rev() {
            let row = y as f64;
            points.push(self.to_drawing(0.0, row + 0.5));
            points.push(self.to_drawing(1.0 / 3.0, row));
        }
        points
    }

    /// Iterate over every position in the lattice, column by column
    pub fn positions(&self) -> impl Iterator<Item = HexPoint> {
        let height = self.height;
        (0..self.width)
            .flat_map(move |x| (0..height).map(move |y| HexPoint::new(x, y)))
    }

    /// Create a fresh (all-sea) hex for every position in the lattice, in
    /// [Self::index] order
    pub fn hexes(&self) -> Vec<Hex> {
        self.positions()
            .map(|position| {
                Hex::new(position, self.vertices(position), self.center(position))
            })
            .collect()
    }
}
