use thiserror::Error;

use crate::geometry::Coord;


/// Malformed or inconsistent grid input - fatal, never retried
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("no start marker '{0}' in grid")]
    MissingStart(char),
    #[error("no end marker '{0}' in grid")]
    MissingEnd(char),
    #[error("grid of {width}x{height} cells does not fit 32-bit coordinates")]
    TooLarge { width: usize, height: usize },
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),
    #[error("invalid coordinate on line {line}: {text:?}")]
    InvalidCoordinate { line: usize, text: String },
}


#[derive(Debug, Error)]
pub enum PathPlannerError {
    #[error("no path found")]
    NoPathFound, // Unable to find a path to the goal
    #[error("node index {0} is missing from the node map")]
    UnknownNodeIndex(usize),
    #[error(transparent)]
    Grid(#[from] GridError),
}
