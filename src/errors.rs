use thiserror::Error;

use crate::geometry::Point;


/// Errors raised while building search inputs or reading search results.
///
/// An unreachable target is never an error for the cost-returning searches,
/// those report `infinity` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Target was never assigned a predecessor
    #[error("no path to the requested target")]
    Unreachable,
    /// Predecessor links loop or dangle before reaching the source
    #[error("predecessor chain does not lead back to the source")]
    BrokenPredecessorChain,
    #[error("invalid grid bounds ({x0}, {y0})..=({x1}, {y1})")]
    InvalidBounds { x0: i64, y0: i64, x1: i64, y1: i64 },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },
    #[error("grid has no cells")]
    EmptyGrid,
    /// Cell data does not fill the bounds, e.g. a hand-edited serialized grid
    #[error("grid bounds hold {expected} cells but {found} were given")]
    CellCount { expected: usize, found: usize },
    #[error("point {0} is outside the grid")]
    OutOfBounds(Point),
    /// Only horizontal, vertical and 45 degree lines can be drawn
    #[error("cannot draw a line from {from} to {to}")]
    UnsupportedLine { from: Point, to: Point },
}
