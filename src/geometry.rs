//! 2D coordinate and rotation utilities.
//!
//! Shapes live in a fixed 3x3 bounding box and rotate in quarter turns
//! about the box center, so a cell at (x, y) maps to (y, 2-x). Four
//! applications return every cell to its starting position.

/// A 2D coordinate: a cell offset within a shape box, or an absolute
/// grid position once translated onto a surface.
pub type Coord = (i32, i32);

/// Side length of the bounding box every shape pattern lives in.
pub const BOX_DIM: i32 = 3;

/// Rotates a cell a quarter turn clockwise about the bounding-box center.
#[inline]
pub const fn rotate_cell_cw(cell: Coord) -> Coord {
    (cell.1, BOX_DIM - 1 - cell.0)
}

/// Unit offsets for the four cardinal directions, in scan order:
/// north, east, south, west.
pub const CARDINALS: [Coord; 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Translates a cell by an offset.
#[inline]
pub const fn translate(cell: Coord, offset: Coord) -> Coord {
    (cell.0 + offset.0, cell.1 + offset.1)
}
