//! Perfect-maze generation via randomized depth-first carving.
//!
//! The generator starts from a fully-walled grid and runs a recursive
//! backtracker (iterative, explicit stack): from the current cell, pick a
//! random unvisited neighbor, knock down the wall between the two cells on
//! both sides, and descend; backtrack when no unvisited neighbor remains.
//! Every cell is entered through exactly one carved passage, so the carved
//! graph is a spanning tree over the cells -- connected and acyclic with
//! exactly N squared minus one passages. That is the definition of a
//! *perfect* maze and guarantees a unique simple path between start and
//! goal.
//!
//! # Determinism
//!
//! Carving is driven by a [`SmallRng`] seeded from `MazeParams::seed`.
//! The same seed always produces the same maze, enabling reproducible
//! scenarios and replayable tests. When no seed is given, one is drawn
//! from the thread-local OS-entropy generator and recorded on the grid,
//! so an operator can still reproduce any maze from the generation log.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use micromouse_types::{Cell, Direction, WallMask};

use crate::error::MazeError;
use crate::grid::Grid;

/// The smallest grid worth calling a maze.
pub const MIN_MAZE_SIZE: u16 = 2;

/// Default grid side length, matching the classic 32x32 competition maze.
pub const DEFAULT_MAZE_SIZE: u16 = 32;

/// Policy for placing the goal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPlacement {
    /// The corner diagonally opposite the origin: `(size - 1, size - 1)`.
    FarCorner,
    /// The center cell `(size / 2, size / 2)`, the classic micromouse
    /// target.
    Center,
    /// An explicit cell, validated against the grid bounds.
    Fixed {
        /// Goal column.
        x: u16,
        /// Goal row.
        y: u16,
    },
}

impl Default for GoalPlacement {
    fn default() -> Self {
        Self::FarCorner
    }
}

/// Parameters for one maze generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeParams {
    /// Grid side length; must be at least [`MIN_MAZE_SIZE`].
    pub size: u16,
    /// Carving seed. `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
    /// The start cell, also the carve origin.
    pub start: Cell,
    /// Where to put the goal.
    pub goal: GoalPlacement,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_MAZE_SIZE,
            seed: None,
            start: Cell::new(0, 0),
            goal: GoalPlacement::FarCorner,
        }
    }
}

/// Generate a perfect maze from the given parameters.
///
/// Validation happens before any carving: the size must be at least
/// [`MIN_MAZE_SIZE`], start and goal must lie within bounds, and the two
/// must be distinct cells. A failed validation is fatal to the maze
/// instance -- no grid is produced.
///
/// # Errors
///
/// Returns [`MazeError::InvalidSize`], [`MazeError::OutOfBounds`], or
/// [`MazeError::StartIsGoal`] when the parameters are rejected.
pub fn generate(params: &MazeParams) -> Result<Grid, MazeError> {
    if params.size < MIN_MAZE_SIZE {
        return Err(MazeError::InvalidSize {
            size: params.size,
            min: MIN_MAZE_SIZE,
        });
    }

    let size = params.size;
    let start = params.start;
    if start.x >= size || start.y >= size {
        return Err(MazeError::OutOfBounds { cell: start, size });
    }

    let goal = place_goal(size, params.goal)?;
    if start == goal {
        return Err(MazeError::StartIsGoal(start));
    }

    let seed = params.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = SmallRng::seed_from_u64(seed);

    // Every cell starts fully walled; carving opens passages pairwise.
    let mut cells: BTreeMap<Cell, WallMask> = BTreeMap::new();
    for x in 0..size {
        for y in 0..size {
            cells.insert(Cell::new(x, y), WallMask::FULL);
        }
    }

    let mut visited: BTreeSet<Cell> = BTreeSet::new();
    let mut stack: Vec<Cell> = Vec::new();
    visited.insert(start);
    stack.push(start);

    while let Some(&current) = stack.last() {
        let choices: Vec<(Direction, Cell)> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                current
                    .step(direction)
                    .filter(|next| next.x < size && next.y < size && !visited.contains(next))
                    .map(|next| (direction, next))
            })
            .collect();

        if choices.is_empty() {
            stack.pop();
            continue;
        }

        let index = rng.random_range(0..choices.len());
        let Some(&(direction, next)) = choices.get(index) else {
            stack.pop();
            continue;
        };

        carve(&mut cells, current, direction, next);
        visited.insert(next);
        stack.push(next);
    }

    let grid = Grid::from_parts(size, cells, start, goal, seed);
    info!(
        size,
        seed,
        start = %grid.start(),
        goal = %grid.goal(),
        passages = grid.passage_count(),
        "maze generated"
    );
    Ok(grid)
}

/// Resolve the goal placement policy to a concrete, validated cell.
fn place_goal(size: u16, placement: GoalPlacement) -> Result<Cell, MazeError> {
    let goal = match placement {
        GoalPlacement::FarCorner => {
            let last = size.checked_sub(1).unwrap_or_default();
            Cell::new(last, last)
        }
        GoalPlacement::Center => {
            let mid = size.checked_div(2).unwrap_or_default();
            Cell::new(mid, mid)
        }
        GoalPlacement::Fixed { x, y } => Cell::new(x, y),
    };
    if goal.x >= size || goal.y >= size {
        return Err(MazeError::OutOfBounds { cell: goal, size });
    }
    Ok(goal)
}

/// Open the wall between two adjacent cells on both sides.
fn carve(cells: &mut BTreeMap<Cell, WallMask>, from: Cell, direction: Direction, to: Cell) {
    if let Some(mask) = cells.get_mut(&from) {
        *mask = mask.without_wall(direction);
    }
    if let Some(mask) = cells.get_mut(&to) {
        *mask = mask.without_wall(direction.opposite());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_params(size: u16, seed: u64) -> MazeParams {
        MazeParams {
            size,
            seed: Some(seed),
            ..MazeParams::default()
        }
    }

    #[test]
    fn rejects_sizes_below_minimum() {
        for size in [0, 1] {
            let result = generate(&seeded_params(size, 7));
            assert_eq!(
                result.err(),
                Some(MazeError::InvalidSize {
                    size,
                    min: MIN_MAZE_SIZE
                })
            );
        }
    }

    #[test]
    fn rejects_out_of_bounds_start() {
        let params = MazeParams {
            start: Cell::new(9, 0),
            ..seeded_params(5, 7)
        };
        assert!(matches!(
            generate(&params),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_out_of_bounds_fixed_goal() {
        let params = MazeParams {
            goal: GoalPlacement::Fixed { x: 5, y: 5 },
            ..seeded_params(5, 7)
        };
        assert!(matches!(
            generate(&params),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_goal_on_start() {
        let params = MazeParams {
            goal: GoalPlacement::Fixed { x: 0, y: 0 },
            ..seeded_params(5, 7)
        };
        assert_eq!(
            generate(&params).err(),
            Some(MazeError::StartIsGoal(Cell::new(0, 0)))
        );
    }

    #[test]
    fn generated_mazes_are_perfect_across_sizes_and_seeds() {
        for size in [2, 3, 5, 8, 16] {
            for seed in [1, 42, 1337] {
                let grid = generate(&seeded_params(size, seed)).ok();
                assert!(
                    grid.is_some(),
                    "generation failed for size {size} seed {seed}"
                );
                let Some(grid) = grid else {
                    return;
                };
                assert_eq!(grid.cell_count(), usize::from(size).pow(2));
                assert!(
                    grid.is_perfect(),
                    "maze of size {size} with seed {seed} is not perfect"
                );
            }
        }
    }

    #[test]
    fn carved_walls_stay_symmetric() {
        let grid = generate(&seeded_params(8, 99)).ok();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        for x in 0..grid.size() {
            for y in 0..grid.size() {
                let cell = Cell::new(x, y);
                for direction in Direction::ALL {
                    if let Some(neighbor) = grid.neighbor(cell, direction) {
                        assert_eq!(
                            grid.wall(cell, direction),
                            grid.wall(neighbor, direction.opposite())
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_maze() {
        let first = generate(&seeded_params(16, 2024));
        let second = generate(&seeded_params(16, 2024));
        assert!(first.is_ok());
        assert_eq!(first.ok(), second.ok());
    }

    #[test]
    fn different_seeds_produce_different_mazes() {
        let first = generate(&seeded_params(16, 1)).ok();
        let second = generate(&seeded_params(16, 2)).ok();
        assert!(first.is_some());
        assert!(second.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn far_corner_goal_lands_opposite_the_origin() {
        let grid = generate(&seeded_params(5, 3)).ok();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        assert_eq!(grid.goal(), Cell::new(4, 4));
        assert_eq!(grid.start(), Cell::new(0, 0));
    }

    #[test]
    fn center_goal_lands_in_the_middle() {
        let params = MazeParams {
            goal: GoalPlacement::Center,
            ..seeded_params(5, 3)
        };
        let grid = generate(&params).ok();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        assert_eq!(grid.goal(), Cell::new(2, 2));
    }

    #[test]
    fn custom_start_is_respected() {
        let params = MazeParams {
            start: Cell::new(2, 3),
            ..seeded_params(5, 3)
        };
        let grid = generate(&params).ok();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        assert_eq!(grid.start(), Cell::new(2, 3));
        assert!(grid.is_perfect());
    }

    #[test]
    fn unseeded_generation_still_produces_a_perfect_maze() {
        let params = MazeParams {
            seed: None,
            ..seeded_params(6, 0)
        };
        let grid = generate(&params).ok();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        assert!(grid.is_perfect());
        // A unique path from start to goal must exist.
        assert!(grid.path_between(grid.start(), grid.goal()).is_some());
    }
}
