//! Shape-packing feasibility library.
//!
//! Decides whether a required multiset of fixed 3x3-bounding-box
//! polyomino shapes can be placed onto a rectangular surface without
//! overlap, using axis-aligned translation and quarter-turn rotation
//! only. The default engine is a seeded randomized constructive search;
//! an exhaustive backtracking mode is available when a definitive
//! answer is needed.

pub mod geometry;
pub mod oracle;
pub mod render;
pub mod shape;
pub mod solver;
pub mod surface;

pub use oracle::FeasibilityOracle;
pub use shape::{Catalog, MalformedShapeError, PlacedShape, Shape};
pub use solver::{FillOutcome, PlacementEngine, SearchConfig};
pub use surface::{MalformedSurfaceError, Surface};
