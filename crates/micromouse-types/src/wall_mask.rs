//! Per-cell wall encoding.
//!
//! Each cell stores a 4-bit mask, one bit per absolute direction, with a set
//! bit meaning a wall is present on that side. Wall bits are mutated only
//! during maze generation; afterwards the grid is immutable.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A 4-bit wall mask for one cell.
///
/// Bit layout (low to high): North, East, South, West. All operations are
/// pure bit manipulation; the upper four bits of the backing byte are never
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallMask(u8);

impl WallMask {
    /// A mask with walls on all four sides (every cell starts like this).
    pub const FULL: Self = Self(0b1111);

    /// A mask with no walls on any side.
    pub const OPEN: Self = Self(0b0000);

    /// The bit representing a wall in the given direction.
    const fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }

    /// Whether a wall is present on the given side.
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    /// Return this mask with a wall added on the given side.
    #[must_use]
    pub const fn with_wall(self, direction: Direction) -> Self {
        Self(self.0 | Self::bit(direction))
    }

    /// Return this mask with the wall on the given side removed.
    #[must_use]
    pub const fn without_wall(self, direction: Direction) -> Self {
        Self(self.0 & !Self::bit(direction))
    }

    /// The number of walled sides (0 to 4).
    #[must_use]
    pub const fn wall_count(self) -> u32 {
        self.0.count_ones()
    }

    /// The number of open sides (0 to 4).
    #[must_use]
    pub const fn open_count(self) -> u32 {
        4u32.saturating_sub(self.0.count_ones())
    }

    /// The raw 4-bit value.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for WallMask {
    /// Cells default to fully walled; generation carves passages out.
    fn default() -> Self {
        Self::FULL
    }
}
