//! Error types for maze construction.
//!
//! All fallible operations in this crate return [`MazeError`] through the
//! standard [`Result`] type alias. Generation-time failures are fatal to
//! the maze instance: no grid is produced, so no session can ever exist.

use micromouse_types::Cell;

/// Errors that can occur while validating parameters or generating a maze.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// The requested grid side length is below the minimum.
    #[error("invalid maze size {size} (minimum is {min})")]
    InvalidSize {
        /// The rejected size.
        size: u16,
        /// The smallest acceptable size.
        min: u16,
    },

    /// A start or goal cell lies outside the grid.
    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// The grid side length.
        size: u16,
    },

    /// The start and goal resolved to the same cell.
    #[error("start and goal are both {0}")]
    StartIsGoal(Cell),
}
