//! Maze grid model and generator for the Micromouse engine.
//!
//! This crate owns the immutable side of the engine: the [`Grid`] of cells
//! and wall masks, and the generator that carves a perfect maze into it.
//! Once generated, a grid is never mutated; sessions share it read-only.
//!
//! # Modules
//!
//! - [`error`] -- Error types for maze construction.
//! - [`generator`] -- Randomized depth-first carve producing a perfect
//!   maze (connected, acyclic, exactly one path between any two cells),
//!   with seedable randomness and start/goal placement policy.
//! - [`grid`] -- The [`Grid`]: wall queries with boundary semantics,
//!   neighbor resolution, relative sensor views, and the graph
//!   diagnostics the invariant tests rely on.

pub mod error;
pub mod generator;
pub mod grid;

// Re-export primary types at crate root.
pub use error::MazeError;
pub use generator::{GoalPlacement, MazeParams, generate};
pub use grid::Grid;
