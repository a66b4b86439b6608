use crate::grid::Position;
use thiserror::Error;

/// Failures raised by the grid editing surface.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("position {position:?} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("layout line {line}: {reason}")]
    Layout { line: usize, reason: String },

    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised by a search strategy.
///
/// "No path" is never an error: it is a regular terminal snapshot with
/// `found == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("grid has no start position")]
    MissingStart,

    #[error("grid has no target position")]
    MissingTarget,

    #[error("search already finished")]
    Finished,
}

/// Failures raised while setting up or driving a run from the command line.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{0}")]
    UnknownAlgorithm(String),
}
