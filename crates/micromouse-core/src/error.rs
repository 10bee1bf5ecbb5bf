//! Error types for the `micromouse-core` crate.
//!
//! The taxonomy the transport layer maps onto status codes:
//! [`CoreError::MouseNotFound`] is the NotFound class,
//! [`ParseDirectionError`] (raised at the token-parse boundary in
//! `micromouse-types`) is the InvalidArgument class, and a blocked move is
//! *not* an error at all -- it comes back as a successful
//! [`MoveOutcome`] with `success == false`.
//!
//! [`MoveOutcome`]: micromouse_types::MoveOutcome
//! [`ParseDirectionError`]: micromouse_types::ParseDirectionError

use micromouse_types::MouseId;

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The mouse identifier is unknown to an operation that does not
    /// implicitly create sessions.
    #[error("mouse not found: {0}")]
    MouseNotFound(MouseId),

    /// A completion token was requested before the mouse reached the goal.
    #[error("mouse {0} has not reached the goal yet")]
    NotSolved(MouseId),

    /// A lock guarding engine state was poisoned by a panicking holder.
    ///
    /// With the workspace's panic lints this cannot happen in practice,
    /// but lock acquisition is fallible and the failure must surface as a
    /// value rather than a panic of its own.
    #[error("engine state lock poisoned")]
    StatePoisoned,

    /// Maze generation failed; no maze instance was produced.
    #[error("maze generation failed: {0}")]
    Maze(#[from] micromouse_maze::MazeError),
}
