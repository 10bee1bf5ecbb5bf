//! Error types for the demo runner.

use micromouse_types::Cell;

/// Errors that can occur while driving a mouse through the maze.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] micromouse_core::ConfigError),

    /// The engine refused an operation.
    #[error("engine error: {0}")]
    Engine(#[from] micromouse_core::CoreError),

    /// The step budget ran out before the goal was reached.
    #[error("goal not reached within {limit} steps")]
    StepLimit {
        /// The configured step budget.
        limit: u64,
    },

    /// The sensors reported walls on all four sides.
    ///
    /// Cannot happen on a grid produced by the generator (every cell of a
    /// perfect maze has at least one open side), but the sensor type
    /// admits it, so the follower handles it instead of looping forever.
    #[error("mouse is walled in at {position}")]
    WalledIn {
        /// Where the mouse was stuck.
        position: Cell,
    },
}
