//! The maze grid: cells, wall queries, and graph diagnostics.
//!
//! A [`Grid`] is immutable after generation and shared read-only by every
//! mouse session on the maze instance. It answers exactly two kinds of
//! question for the movement engine: "is there a wall on this side of this
//! cell?" and "which cell lies through that opening?". Everything else here
//! (connectivity, passage counts, pathfinding) exists for diagnostics and
//! for the perfect-maze invariant tests.
//!
//! # Boundary semantics
//!
//! Any query that looks past the grid edge reports a wall, regardless of
//! the stored mask. A mouse can therefore never leave the grid even if a
//! corrupted mask were to claim the boundary is open.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use micromouse_types::{Cell, Direction, RelativeDirection, SurroundingsView, WallMask};

/// An immutable maze grid of `size` by `size` cells.
///
/// Construction goes through [`generate`]; there is no way to obtain a
/// grid that has not passed parameter validation and carving. The grid is
/// deliberately not serializable: the wall layout must never leave the
/// engine, and a maze is regenerated from its seed rather than persisted.
///
/// [`generate`]: crate::generator::generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Side length of the square grid.
    size: u16,
    /// Wall mask per cell. Every in-bounds cell has an entry.
    cells: BTreeMap<Cell, WallMask>,
    /// The cell every mouse starts in.
    start: Cell,
    /// The goal cell.
    goal: Cell,
    /// The seed the maze was carved from. Kept for reproducibility and
    /// operator logs; never exposed through [`MazeInfo`].
    ///
    /// [`MazeInfo`]: micromouse_types::MazeInfo
    seed: u64,
}

impl Grid {
    /// Assemble a grid from generator output.
    pub(crate) const fn from_parts(
        size: u16,
        cells: BTreeMap<Cell, WallMask>,
        start: Cell,
        goal: Cell,
        seed: u64,
    ) -> Self {
        Self {
            size,
            cells,
            start,
            goal,
            seed,
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// The cell every mouse starts in.
    #[must_use]
    pub const fn start(&self) -> Cell {
        self.start
    }

    /// The goal cell.
    #[must_use]
    pub const fn goal(&self) -> Cell {
        self.goal
    }

    /// The seed the maze was carved from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the cell lies within grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    /// Whether the cell is the goal.
    #[must_use]
    pub fn is_goal(&self, cell: Cell) -> bool {
        cell == self.goal
    }

    // -------------------------------------------------------------------
    // Wall queries
    // -------------------------------------------------------------------

    /// Whether a wall blocks movement from `cell` in `direction`.
    ///
    /// Out-of-bounds cells and steps across the grid edge always report a
    /// wall, whatever the stored mask says.
    #[must_use]
    pub fn wall(&self, cell: Cell, direction: Direction) -> bool {
        if !self.contains(cell) {
            return true;
        }
        let Some(neighbor) = cell.step(direction) else {
            return true;
        };
        if !self.contains(neighbor) {
            return true;
        }
        self.cells
            .get(&cell)
            .is_none_or(|mask| mask.has(direction))
    }

    /// The boundary-corrected wall mask for a cell.
    ///
    /// Out-of-bounds cells report [`WallMask::FULL`], matching the wall
    /// semantics of [`Grid::wall`].
    #[must_use]
    pub fn walls(&self, cell: Cell) -> WallMask {
        Direction::ALL.iter().fold(WallMask::OPEN, |mask, direction| {
            if self.wall(cell, *direction) {
                mask.with_wall(*direction)
            } else {
                mask
            }
        })
    }

    /// The neighboring cell in `direction`, or `None` at the grid edge.
    ///
    /// Ignores walls; use [`Grid::open_neighbor`] for passable neighbors.
    #[must_use]
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    /// The neighboring cell in `direction` if no wall blocks the way.
    #[must_use]
    pub fn open_neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        if self.wall(cell, direction) {
            None
        } else {
            self.neighbor(cell, direction)
        }
    }

    /// All cells reachable from `cell` in one step through an open passage.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.open_neighbor(cell, direction))
    }

    /// The sensor reading at `cell` for a mouse facing `heading`.
    ///
    /// Rotates the absolute wall geometry into the mouse's frame: each
    /// relative slot is resolved to its absolute direction and looked up
    /// with full boundary semantics.
    #[must_use]
    pub fn relative_walls(&self, cell: Cell, heading: Direction) -> SurroundingsView {
        SurroundingsView {
            forward: self.wall(cell, heading.resolve(RelativeDirection::Forward)),
            backward: self.wall(cell, heading.resolve(RelativeDirection::Backward)),
            left: self.wall(cell, heading.resolve(RelativeDirection::Left)),
            right: self.wall(cell, heading.resolve(RelativeDirection::Right)),
        }
    }

    // -------------------------------------------------------------------
    // Graph diagnostics
    // -------------------------------------------------------------------

    /// The number of carved passages in the grid.
    ///
    /// Each passage is counted once by scanning only the North and East
    /// side of every cell; the opposite sides belong to the neighboring
    /// cell's scan and the boundary is always walled.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.cells
            .keys()
            .map(|cell| {
                [Direction::North, Direction::East]
                    .iter()
                    .filter(|direction| !self.wall(*cell, **direction))
                    .count()
            })
            .sum()
    }

    /// Whether every cell is reachable from the start through open
    /// passages.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.cells.is_empty() {
            return true;
        }

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(self.start);
        queue.push_back(self.start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.open_neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len() == self.cells.len()
    }

    /// Whether the grid is a perfect maze: connected and acyclic, so that
    /// exactly one simple path exists between any two cells.
    ///
    /// For an N by N grid this is equivalent to being connected with
    /// exactly N squared minus one passages (the spanning-tree property).
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        let expected = self
            .cells
            .len()
            .checked_sub(1)
            .unwrap_or_default();
        self.is_connected() && self.passage_count() == expected
    }

    /// The path from `from` to `to` through open passages, endpoints
    /// included, or `None` if no path exists.
    ///
    /// Uses breadth-first search with predecessor reconstruction. In a
    /// perfect maze the returned path is the unique simple path between
    /// the two cells.
    #[must_use]
    pub fn path_between(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        // Predecessor map for path reconstruction.
        let mut prev: BTreeMap<Cell, Cell> = BTreeMap::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        'search: while let Some(current) = queue.pop_front() {
            for neighbor in self.open_neighbors(current) {
                if visited.insert(neighbor) {
                    prev.insert(neighbor, current);
                    if neighbor == to {
                        break 'search;
                    }
                    queue.push_back(neighbor);
                }
            }
        }

        if !prev.contains_key(&to) {
            return None;
        }

        let mut path = VecDeque::new();
        let mut current = to;
        path.push_front(current);
        while let Some(&predecessor) = prev.get(&current) {
            path.push_front(predecessor);
            current = predecessor;
            if current == from {
                break;
            }
        }

        Some(path.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a grid by hand from a list of carved passages.
    ///
    /// Every cell starts fully walled; each `(cell, direction)` pair opens
    /// the wall on both sides of the passage.
    fn make_grid(size: u16, passages: &[(Cell, Direction)], start: Cell, goal: Cell) -> Grid {
        let mut cells: BTreeMap<Cell, WallMask> = BTreeMap::new();
        for x in 0..size {
            for y in 0..size {
                cells.insert(Cell::new(x, y), WallMask::FULL);
            }
        }
        for (cell, direction) in passages {
            if let Some(neighbor) = cell.step(*direction) {
                if let Some(mask) = cells.get_mut(cell) {
                    *mask = mask.without_wall(*direction);
                }
                if let Some(mask) = cells.get_mut(&neighbor) {
                    *mask = mask.without_wall(direction.opposite());
                }
            }
        }
        Grid::from_parts(size, cells, start, goal, 0)
    }

    /// A 2x2 perfect maze: (0,0) - (0,1) - (1,1) - (1,0), one corridor
    /// around three sides.
    fn corridor_grid() -> Grid {
        make_grid(
            2,
            &[
                (Cell::new(0, 0), Direction::North),
                (Cell::new(0, 1), Direction::East),
                (Cell::new(1, 1), Direction::South),
            ],
            Cell::new(0, 0),
            Cell::new(1, 0),
        )
    }

    #[test]
    fn boundary_is_always_walled() {
        let grid = corridor_grid();
        assert!(grid.wall(Cell::new(0, 0), Direction::South));
        assert!(grid.wall(Cell::new(0, 0), Direction::West));
        assert!(grid.wall(Cell::new(1, 1), Direction::North));
        assert!(grid.wall(Cell::new(1, 1), Direction::East));
        assert_eq!(grid.neighbor(Cell::new(0, 0), Direction::West), None);
    }

    #[test]
    fn out_of_bounds_cells_report_full_walls() {
        let grid = corridor_grid();
        let outside = Cell::new(7, 7);
        assert_eq!(grid.walls(outside), WallMask::FULL);
        for direction in Direction::ALL {
            assert!(grid.wall(outside, direction));
        }
    }

    #[test]
    fn carved_passages_are_symmetric() {
        let grid = corridor_grid();
        for x in 0..grid.size() {
            for y in 0..grid.size() {
                let cell = Cell::new(x, y);
                for direction in Direction::ALL {
                    if let Some(neighbor) = grid.neighbor(cell, direction) {
                        assert_eq!(
                            grid.wall(cell, direction),
                            grid.wall(neighbor, direction.opposite()),
                            "asymmetric wall between {cell} and {neighbor}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn open_neighbor_respects_walls() {
        let grid = corridor_grid();
        assert_eq!(
            grid.open_neighbor(Cell::new(0, 0), Direction::North),
            Some(Cell::new(0, 1))
        );
        // (0,0) -> (1,0) was never carved.
        assert_eq!(grid.open_neighbor(Cell::new(0, 0), Direction::East), None);
    }

    #[test]
    fn relative_walls_rotate_with_heading() {
        let grid = corridor_grid();
        let cell = Cell::new(0, 0);

        // Facing north: the opening is straight ahead.
        let north_view = grid.relative_walls(cell, Direction::North);
        assert!(!north_view.forward);
        assert!(north_view.backward);
        assert!(north_view.left);
        assert!(north_view.right);

        // Facing east: the same opening is now on the left.
        let east_view = grid.relative_walls(cell, Direction::East);
        assert!(east_view.forward);
        assert!(east_view.backward);
        assert!(!east_view.left);
        assert!(east_view.right);

        // Facing south: it is behind.
        let south_view = grid.relative_walls(cell, Direction::South);
        assert!(south_view.forward);
        assert!(!south_view.backward);
        assert!(south_view.left);
        assert!(south_view.right);
    }

    #[test]
    fn corridor_grid_is_perfect() {
        let grid = corridor_grid();
        assert_eq!(grid.cell_count(), 4);
        assert_eq!(grid.passage_count(), 3);
        assert!(grid.is_connected());
        assert!(grid.is_perfect());
    }

    #[test]
    fn a_cycle_breaks_perfection() {
        // The corridor plus the (0,0)-(1,0) passage closes a loop.
        let grid = make_grid(
            2,
            &[
                (Cell::new(0, 0), Direction::North),
                (Cell::new(0, 1), Direction::East),
                (Cell::new(1, 1), Direction::South),
                (Cell::new(0, 0), Direction::East),
            ],
            Cell::new(0, 0),
            Cell::new(1, 0),
        );
        assert!(grid.is_connected());
        assert_eq!(grid.passage_count(), 4);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn missing_passages_disconnect_the_grid() {
        let grid = make_grid(
            2,
            &[(Cell::new(0, 0), Direction::North)],
            Cell::new(0, 0),
            Cell::new(1, 0),
        );
        assert!(!grid.is_connected());
        assert!(!grid.is_perfect());
    }

    #[test]
    fn path_between_follows_the_corridor() {
        let grid = corridor_grid();
        let path = grid.path_between(Cell::new(0, 0), Cell::new(1, 0));
        assert_eq!(
            path,
            Some(vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 0),
            ])
        );
    }

    #[test]
    fn path_between_same_cell_is_trivial() {
        let grid = corridor_grid();
        let cell = Cell::new(1, 1);
        assert_eq!(grid.path_between(cell, cell), Some(vec![cell]));
    }

    #[test]
    fn path_between_fails_when_disconnected() {
        let grid = make_grid(
            2,
            &[(Cell::new(0, 0), Direction::North)],
            Cell::new(0, 0),
            Cell::new(1, 0),
        );
        assert_eq!(grid.path_between(Cell::new(0, 0), Cell::new(1, 0)), None);
    }

    #[test]
    fn path_between_rejects_out_of_bounds_endpoints() {
        let grid = corridor_grid();
        assert_eq!(grid.path_between(Cell::new(0, 0), Cell::new(9, 9)), None);
    }

}
