//! Shape catalog and placed shape instances.
//!
//! Each shape is a polyomino inside a 3x3 bounding box, parsed from a
//! three-row `#`/`.` pattern. A catalog holds exactly six shapes in a
//! significant order that matches the per-surface requirement counts.

use thiserror::Error;

use crate::geometry::{rotate_cell_cw, translate, Coord, BOX_DIM};

/// Number of shapes in a catalog.
pub const CATALOG_SIZE: usize = 6;

/// Marker character for an occupied pattern cell.
const OCCUPIED: char = '#';

/// Marker character for an empty pattern cell.
const EMPTY: char = '.';

/// The six shape patterns of the standard puzzle input, in catalog order.
const STANDARD_PATTERNS: [&str; CATALOG_SIZE] = [
    "###\n#.#\n#.#",
    "#..\n##.\n###",
    "###\n###\n..#",
    ".##\n##.\n###",
    "###\n.#.\n###",
    ".##\n##.\n#..",
];

/// Error raised while parsing a shape pattern at catalog-construction time.
#[derive(Debug, Error)]
pub enum MalformedShapeError {
    #[error("expected 3 pattern rows, got {0}")]
    WrongRowCount(usize),
    #[error("pattern row {0} has {1} columns, expected 3")]
    WrongRowWidth(usize, usize),
    #[error("unexpected character '{1}' in pattern row {0}")]
    UnexpectedChar(usize, char),
    #[error("pattern has no occupied cells")]
    NoOccupiedCells,
    #[error("expected 6 catalog patterns, got {0}")]
    WrongCatalogSize(usize),
}

/// An immutable polyomino: occupied cell offsets inside a 3x3 bounding box.
///
/// Cells are kept sorted so two shapes compare equal exactly when they
/// occupy the same offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: usize,
    cells: Vec<Coord>,
}

impl Shape {
    /// Parses a three-row `#`/`.` pattern into a shape.
    pub fn from_pattern(kind: usize, pattern: &str) -> Result<Self, MalformedShapeError> {
        let rows: Vec<&str> = pattern.lines().map(str::trim).collect();
        if rows.len() != BOX_DIM as usize {
            return Err(MalformedShapeError::WrongRowCount(rows.len()));
        }

        let mut cells = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != BOX_DIM as usize {
                return Err(MalformedShapeError::WrongRowWidth(y, width));
            }
            for (x, marker) in row.chars().enumerate() {
                match marker {
                    OCCUPIED => cells.push((x as i32, y as i32)),
                    EMPTY => {}
                    other => return Err(MalformedShapeError::UnexpectedChar(y, other)),
                }
            }
        }
        if cells.is_empty() {
            return Err(MalformedShapeError::NoOccupiedCells);
        }

        // row scan already yields sorted-by-(y, x); normalize to (x, y) order
        cells.sort_unstable();
        Ok(Self { kind, cells })
    }

    /// Index of this shape in its catalog.
    #[inline]
    pub fn kind(&self) -> usize {
        self.kind
    }

    /// Occupied cell offsets, sorted.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of occupied cells; invariant under rotation.
    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Returns this shape rotated a quarter turn clockwise about the
    /// bounding-box center. Four successive applications are the identity.
    pub fn rotate_clockwise(&self) -> Shape {
        let mut cells: Vec<Coord> = self.cells.iter().copied().map(rotate_cell_cw).collect();
        cells.sort_unstable();
        Shape {
            kind: self.kind,
            cells,
        }
    }

    /// All distinct quarter-turn orientations of this shape.
    ///
    /// Symmetric shapes produce fewer than four.
    pub fn unique_orientations(&self) -> Vec<Shape> {
        let mut orientations = vec![self.clone()];
        let mut current = self.clone();
        for _ in 0..3 {
            current = current.rotate_clockwise();
            if !orientations.contains(&current) {
                orientations.push(current.clone());
            }
        }
        orientations
    }
}

/// An immutable, ordered catalog of exactly six shapes.
///
/// Passed explicitly into every engine and oracle call; there is no
/// ambient global catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    shapes: [Shape; CATALOG_SIZE],
}

impl Catalog {
    /// Builds a catalog from six three-row patterns, in requirement order.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, MalformedShapeError> {
        if patterns.len() != CATALOG_SIZE {
            return Err(MalformedShapeError::WrongCatalogSize(patterns.len()));
        }
        let shapes: Vec<Shape> = patterns
            .iter()
            .enumerate()
            .map(|(kind, pattern)| Shape::from_pattern(kind, pattern.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            shapes: shapes.try_into().expect("length checked above"),
        })
    }

    /// The built-in catalog used by the standard puzzle input.
    pub fn standard() -> Self {
        Self::from_patterns(&STANDARD_PATTERNS).expect("built-in patterns are well formed")
    }

    /// All shapes, in catalog order.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The shape for a given kind index.
    #[inline]
    pub fn get(&self, kind: usize) -> &Shape {
        &self.shapes[kind]
    }

    /// Total area the given requirement counts demand, for the fast
    /// area pre-check.
    pub fn min_area(&self, requirements: &[usize; CATALOG_SIZE]) -> usize {
        self.shapes
            .iter()
            .zip(requirements)
            .map(|(shape, &count)| count * shape.area())
            .sum()
    }
}

/// A shape instance anchored at an absolute origin on a surface.
///
/// A plain value record; absolute cell positions are derived on demand
/// from the shape offsets and the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShape {
    shape: Shape,
    origin: Coord,
}

impl PlacedShape {
    pub fn new(shape: Shape, origin: Coord) -> Self {
        Self { shape, origin }
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn kind(&self) -> usize {
        self.shape.kind()
    }

    #[inline]
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Pure relocation; the engine is responsible for validating the
    /// new position.
    pub fn translate(&self, new_origin: Coord) -> PlacedShape {
        PlacedShape {
            shape: self.shape.clone(),
            origin: new_origin,
        }
    }

    /// Absolute grid cells this placement occupies.
    pub fn absolute_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.shape
            .cells()
            .iter()
            .map(move |&cell| translate(cell, self.origin))
    }

    /// True if the two placements occupy any common cell.
    pub fn collides_with(&self, other: &PlacedShape) -> bool {
        self.absolute_cells()
            .any(|cell| other.absolute_cells().any(|theirs| theirs == cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_expected_areas() {
        let catalog = Catalog::standard();
        let areas: Vec<usize> = catalog.shapes().iter().map(Shape::area).collect();
        assert_eq!(areas, vec![7, 6, 7, 7, 7, 5]);
    }

    #[test]
    fn standard_catalog_cells_stay_inside_the_box() {
        let catalog = Catalog::standard();
        for shape in catalog.shapes() {
            for &(x, y) in shape.cells() {
                assert!((0..BOX_DIM).contains(&x) && (0..BOX_DIM).contains(&y));
            }
        }
    }

    #[test]
    fn four_rotations_restore_every_catalog_shape() {
        let catalog = Catalog::standard();
        for shape in catalog.shapes() {
            let mut rotated = shape.clone();
            for _ in 0..4 {
                rotated = rotated.rotate_clockwise();
            }
            assert_eq!(&rotated, shape, "kind {} did not close", shape.kind());
        }
    }

    #[test]
    fn area_is_invariant_under_rotation() {
        let catalog = Catalog::standard();
        for shape in catalog.shapes() {
            let mut rotated = shape.clone();
            for _ in 0..3 {
                rotated = rotated.rotate_clockwise();
                assert_eq!(rotated.area(), shape.area());
            }
        }
    }

    #[test]
    fn symmetric_shape_has_two_orientations() {
        // kind 4 is the H pattern: 180-degree symmetric, 90-degree not
        let catalog = Catalog::standard();
        assert_eq!(catalog.get(4).unique_orientations().len(), 2);
    }

    #[test]
    fn full_block_has_one_orientation() {
        let block = Shape::from_pattern(0, "###\n###\n###").unwrap();
        assert_eq!(block.unique_orientations().len(), 1);
    }

    #[test]
    fn rejects_wrong_row_count() {
        let err = Shape::from_pattern(0, "###\n###").unwrap_err();
        assert!(matches!(err, MalformedShapeError::WrongRowCount(2)));
    }

    #[test]
    fn rejects_wide_row() {
        let err = Shape::from_pattern(0, "####\n###\n###").unwrap_err();
        assert!(matches!(err, MalformedShapeError::WrongRowWidth(0, 4)));
    }

    #[test]
    fn rejects_unknown_marker() {
        let err = Shape::from_pattern(0, "###\n#?#\n###").unwrap_err();
        assert!(matches!(err, MalformedShapeError::UnexpectedChar(1, '?')));
    }

    #[test]
    fn rejects_empty_pattern() {
        let err = Shape::from_pattern(0, "...\n...\n...").unwrap_err();
        assert!(matches!(err, MalformedShapeError::NoOccupiedCells));
    }

    #[test]
    fn rejects_wrong_catalog_size() {
        let err = Catalog::from_patterns(&["###\n###\n###"]).unwrap_err();
        assert!(matches!(err, MalformedShapeError::WrongCatalogSize(1)));
    }

    #[test]
    fn translate_is_pure_and_offsets_cells() {
        let shape = Shape::from_pattern(2, "#..\n#..\n##.").unwrap();
        let placed = PlacedShape::new(shape, (0, 0));
        let moved = placed.translate((3, 1));

        assert_eq!(placed.origin(), (0, 0));
        assert_eq!(moved.origin(), (3, 1));
        let cells: Vec<Coord> = moved.absolute_cells().collect();
        assert_eq!(cells, vec![(3, 1), (3, 2), (3, 3), (4, 3)]);
    }

    #[test]
    fn collision_requires_a_shared_cell() {
        let bar = Shape::from_pattern(0, "###\n...\n...").unwrap();
        let a = PlacedShape::new(bar.clone(), (0, 0));
        let b = PlacedShape::new(bar.clone(), (2, 0));
        let c = PlacedShape::new(bar, (0, 1));

        assert!(a.collides_with(&b));
        assert!(!a.collides_with(&c));
    }
}
