//! Cell coordinates and the payload structs returned through the engine
//! facade.
//!
//! Everything a transport layer (or a bot client) receives from the engine
//! is defined here: the sensor reading, the move outcome, the diagnostic
//! maze summary, and the per-mouse snapshot. The wall layout itself is
//! deliberately absent from every payload -- exposing it would defeat the
//! maze.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::direction::{Direction, RelativeDirection};
use crate::ids::{MouseId, SolveToken};

/// A cell coordinate on the grid.
///
/// `(0, 0)` is the south-west corner; `x` grows eastward and `y` grows
/// northward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column, growing eastward.
    pub x: u16,
    /// Row, growing northward.
    pub y: u16,
}

impl Cell {
    /// Create a cell coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The coordinate one step in the given direction, or `None` if the
    /// step would leave the coordinate space (underflow past zero or
    /// overflow past `u16::MAX`).
    ///
    /// Upper-bound checks against a concrete grid size belong to the grid,
    /// not the coordinate.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (x, y) = match direction {
            Direction::North => (Some(self.x), self.y.checked_add(1)),
            Direction::East => (self.x.checked_add(1), Some(self.y)),
            Direction::South => (Some(self.x), self.y.checked_sub(1)),
            Direction::West => (self.x.checked_sub(1), Some(self.y)),
        };
        match (x, y) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The wall reading around a mouse, expressed relative to its heading.
///
/// `true` means a wall is present in that slot -- the same polarity a
/// physical contact sensor reports. This is the *only* information a mouse
/// receives about the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundingsView {
    /// Wall in the direction the mouse faces.
    pub forward: bool,
    /// Wall behind the mouse.
    pub backward: bool,
    /// Wall to the mouse's left.
    pub left: bool,
    /// Wall to the mouse's right.
    pub right: bool,
}

impl SurroundingsView {
    /// Whether a wall is present in the given relative slot.
    #[must_use]
    pub const fn wall(self, relative: RelativeDirection) -> bool {
        match relative {
            RelativeDirection::Forward => self.forward,
            RelativeDirection::Backward => self.backward,
            RelativeDirection::Left => self.left,
            RelativeDirection::Right => self.right,
        }
    }

    /// The number of open (wall-free) slots.
    #[must_use]
    pub fn open_count(self) -> usize {
        RelativeDirection::ALL
            .iter()
            .filter(|relative| !self.wall(**relative))
            .count()
    }
}

/// The lifecycle phase of a mouse session.
///
/// Derived from the session's monotonic flags, never stored: a session is
/// `Active` until it reaches the goal, `Solved` once it has, and
/// `Completed` once its token has been issued. No transition ever leaves
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MousePhase {
    /// The goal has not been reached yet.
    Active,
    /// The goal has been reached; no token issued yet.
    Solved,
    /// The completion token has been issued.
    Completed,
}

/// The result of one move attempt.
///
/// A blocked move is *not* an error: `success` is `false`, the position and
/// heading are unchanged, and the surroundings describe the cell the mouse
/// is still standing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether the mouse actually moved (`false` means blocked by a wall).
    pub success: bool,
    /// The mouse's position after the attempt.
    pub position: Cell,
    /// The mouse's heading after the attempt. On a successful move this is
    /// the absolute direction just traveled; on a blocked move it is
    /// unchanged.
    pub heading: Direction,
    /// The sensor reading at the post-attempt position and heading.
    pub surroundings: SurroundingsView,
    /// Whether the session has ever reached the goal (monotonic).
    pub solved: bool,
    /// Whether *this* move landed the mouse on the goal cell.
    pub reached_goal: bool,
    /// Total move attempts recorded for this session, blocked ones included.
    pub moves: u64,
    /// The completion token, present whenever this move landed on the goal.
    /// Always the same value for one session, no matter how often the goal
    /// is re-entered.
    pub token: Option<SolveToken>,
}

/// Diagnostic summary of a maze instance.
///
/// Never includes the wall layout or the generation seed; either would let
/// a client solve the maze by inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeInfo {
    /// Grid side length (the maze is `size` by `size` cells).
    pub size: u16,
    /// The cell every mouse starts in.
    pub start: Cell,
    /// The goal cell.
    pub goal: Cell,
}

/// A read-only diagnostic view of one mouse session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseSnapshot {
    /// The mouse's identifier.
    pub id: MouseId,
    /// Current cell.
    pub position: Cell,
    /// Current absolute heading.
    pub heading: Direction,
    /// Total move attempts, blocked ones included.
    pub moves: u64,
    /// Whether the goal has ever been reached.
    pub solved: bool,
    /// Whether the completion token has been issued.
    pub token_issued: bool,
    /// Lifecycle phase derived from the two flags above.
    pub phase: MousePhase,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}
