//! Target surfaces: grid dimensions, required shape counts, and the
//! working placement state mutated during a fill attempt.
//!
//! A surface is parsed from one input line of the form
//! `<W>x<H>: <n0> <n1> <n2> <n3> <n4> <n5>` and is used for exactly one
//! feasibility evaluation. The final `placed`/`occupied` state is kept
//! afterwards so callers can render the packing.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::geometry::{translate, Coord};
use crate::shape::{PlacedShape, Shape, CATALOG_SIZE};

/// Error raised while parsing a surface line.
#[derive(Debug, Error)]
pub enum MalformedSurfaceError {
    #[error("expected a '<width>x<height>' dimension token, got '{0}'")]
    MissingDimensions(String),
    #[error("could not parse a number: {0}")]
    Number(#[from] std::num::ParseIntError),
    #[error("width and height must be positive, got {0}x{1}")]
    NonPositiveDimensions(i32, i32),
    #[error("expected one count per catalog shape, got {0}")]
    WrongCountArity(usize),
}

/// A rectangular target grid plus the required count of each shape kind.
#[derive(Debug, Clone)]
pub struct Surface {
    width: i32,
    height: i32,
    requirements: [usize; CATALOG_SIZE],
    placed: Vec<PlacedShape>,
    occupied: FxHashSet<Coord>,
}

impl Surface {
    pub fn new(
        width: i32,
        height: i32,
        requirements: [usize; CATALOG_SIZE],
    ) -> Result<Self, MalformedSurfaceError> {
        if width <= 0 || height <= 0 {
            return Err(MalformedSurfaceError::NonPositiveDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            requirements,
            placed: Vec::new(),
            occupied: FxHashSet::default(),
        })
    }

    /// Parses a `<W>x<H>: <n0..n5>` line.
    ///
    /// Tokens are whitespace-separated; the trailing colon on the
    /// dimension token is optional.
    pub fn parse(line: &str) -> Result<Self, MalformedSurfaceError> {
        let mut tokens = line.split_whitespace();
        let dims = tokens
            .next()
            .ok_or_else(|| MalformedSurfaceError::MissingDimensions(line.to_string()))?;
        let dims = dims.strip_suffix(':').unwrap_or(dims);
        let (width, height) = dims
            .split_once('x')
            .ok_or_else(|| MalformedSurfaceError::MissingDimensions(dims.to_string()))?;
        let width: i32 = width.parse()?;
        let height: i32 = height.parse()?;

        let counts: Vec<usize> = tokens
            .map(|token| token.parse())
            .collect::<Result<_, _>>()?;
        if counts.len() != CATALOG_SIZE {
            return Err(MalformedSurfaceError::WrongCountArity(counts.len()));
        }
        let requirements: [usize; CATALOG_SIZE] =
            counts.try_into().expect("arity checked above");

        Self::new(width, height, requirements)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of valid grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// True if the cell lies on the grid.
    #[inline]
    pub fn contains(&self, cell: Coord) -> bool {
        (0..self.width).contains(&cell.0) && (0..self.height).contains(&cell.1)
    }

    /// Required count per shape kind, in catalog order.
    #[inline]
    pub fn requirements(&self) -> &[usize; CATALOG_SIZE] {
        &self.requirements
    }

    /// Total number of shape instances this surface requires.
    pub fn required_total(&self) -> usize {
        self.requirements.iter().sum()
    }

    /// Shapes placed so far in the current (or final) attempt.
    #[inline]
    pub fn placed(&self) -> &[PlacedShape] {
        &self.placed
    }

    /// Cells occupied by all placed shapes.
    #[inline]
    pub fn occupied(&self) -> &FxHashSet<Coord> {
        &self.occupied
    }

    /// True once every required instance has been placed.
    pub fn is_filled(&self) -> bool {
        self.placed.len() == self.required_total()
    }

    /// True if every cell of `shape` translated to `origin` lands on a
    /// free in-bounds cell.
    pub fn admits(&self, shape: &Shape, origin: Coord) -> bool {
        shape.cells().iter().all(|&offset| {
            let cell = translate(offset, origin);
            self.contains(cell) && !self.occupied.contains(&cell)
        })
    }

    /// Records a placement, keeping `occupied` in sync.
    ///
    /// Callers must have validated the position with [`Surface::admits`].
    pub(crate) fn place(&mut self, placement: PlacedShape) {
        debug_assert!(self.admits(placement.shape(), placement.origin()));
        for cell in placement.absolute_cells() {
            self.occupied.insert(cell);
        }
        self.placed.push(placement);
    }

    /// Removes the most recent placement, freeing its cells.
    pub(crate) fn unplace_last(&mut self) -> Option<PlacedShape> {
        let placement = self.placed.pop()?;
        for cell in placement.absolute_cells() {
            self.occupied.remove(&cell);
        }
        Some(placement)
    }

    /// Discards all placements, e.g. before a fresh attempt.
    pub(crate) fn clear_placements(&mut self) {
        self.placed.clear();
        self.occupied.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Catalog;

    #[test]
    fn parses_a_surface_line() {
        let surface = Surface::parse("4x4: 0 0 0 0 2 0").unwrap();
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 4);
        assert_eq!(surface.requirements(), &[0, 0, 0, 0, 2, 0]);
        assert_eq!(surface.required_total(), 2);
        assert_eq!(surface.cell_count(), 16);
    }

    #[test]
    fn parses_without_trailing_colon() {
        let surface = Surface::parse("12x5 1 0 1 0 2 2").unwrap();
        assert_eq!((surface.width(), surface.height()), (12, 5));
        assert_eq!(surface.required_total(), 6);
    }

    #[test]
    fn rejects_missing_dimension_token() {
        let err = Surface::parse("4+4: 1 2 3 4 5 6").unwrap_err();
        assert!(matches!(err, MalformedSurfaceError::MissingDimensions(_)));
    }

    #[test]
    fn rejects_non_integer_dimensions() {
        let err = Surface::parse("axb: 0 0 0 0 0 0").unwrap_err();
        assert!(matches!(err, MalformedSurfaceError::Number(_)));
    }

    #[test]
    fn rejects_wrong_count_arity() {
        let err = Surface::parse("3x3: 1 2").unwrap_err();
        assert!(matches!(err, MalformedSurfaceError::WrongCountArity(2)));

        let err = Surface::parse("3x3: 1 2 3 4 5 6 7").unwrap_err();
        assert!(matches!(err, MalformedSurfaceError::WrongCountArity(7)));
    }

    #[test]
    fn rejects_degenerate_grid() {
        let err = Surface::parse("0x5: 0 0 0 0 0 0").unwrap_err();
        assert!(matches!(
            err,
            MalformedSurfaceError::NonPositiveDimensions(0, 5)
        ));
    }

    #[test]
    fn contains_checks_grid_bounds() {
        let surface = Surface::new(3, 2, [0; CATALOG_SIZE]).unwrap();
        assert!(surface.contains((0, 0)));
        assert!(surface.contains((2, 1)));
        assert!(!surface.contains((3, 0)));
        assert!(!surface.contains((0, 2)));
        assert!(!surface.contains((-1, 0)));
    }

    #[test]
    fn admits_rejects_overlap_and_overhang() {
        let catalog = Catalog::standard();
        let mut surface = Surface::new(4, 4, [0; CATALOG_SIZE]).unwrap();
        let shape = catalog.get(4).clone();

        assert!(surface.admits(&shape, (0, 0)));
        assert!(!surface.admits(&shape, (2, 0)), "overhangs the east edge");

        surface.place(PlacedShape::new(shape.clone(), (0, 0)));
        assert!(!surface.admits(&shape, (1, 1)), "collides with placement");
    }

    #[test]
    fn place_and_unplace_keep_occupied_in_sync() {
        let catalog = Catalog::standard();
        let mut surface = Surface::new(6, 6, [0; CATALOG_SIZE]).unwrap();
        let shape = catalog.get(5).clone();

        surface.place(PlacedShape::new(shape.clone(), (0, 0)));
        surface.place(PlacedShape::new(shape.clone(), (3, 3)));
        assert_eq!(surface.placed().len(), 2);
        assert_eq!(surface.occupied().len(), 2 * shape.area());

        let popped = surface.unplace_last().unwrap();
        assert_eq!(popped.origin(), (3, 3));
        assert_eq!(surface.occupied().len(), shape.area());

        surface.clear_placements();
        assert!(surface.placed().is_empty());
        assert!(surface.occupied().is_empty());
    }
}
