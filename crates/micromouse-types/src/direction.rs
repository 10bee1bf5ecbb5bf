//! Absolute and relative direction enums and the heading translation math.
//!
//! A mouse has an absolute *heading* (one of the four cardinal directions,
//! fixed relative to the grid) but issues commands and reads its sensors in
//! *relative* terms (forward/backward/left/right, fixed relative to the
//! heading). The two mappings defined here -- [`Direction::resolve`] and
//! [`Direction::relative_from`] -- are exact inverses for every heading,
//! which is what makes a wall reading round-trip through a move command
//! without drift. Both are written as exhaustive matches rather than index
//! arithmetic so the bijection is checkable by the compiler.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An absolute cardinal direction, fixed relative to the grid.
///
/// The grid convention is `(0, 0)` in the south-west corner with North
/// pointing toward increasing `y` and East toward increasing `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward increasing `y`.
    North,
    /// Toward increasing `x`.
    East,
    /// Toward decreasing `y`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting from North.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Return the direction 180 degrees from this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Return the direction 90 degrees clockwise (a right turn).
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Return the direction 90 degrees counter-clockwise (a left turn).
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// The unit grid offset `(dx, dy)` of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Resolve a relative move command against this heading, yielding the
    /// absolute direction the command targets.
    ///
    /// This is the inverse of [`Direction::relative_from`].
    #[must_use]
    pub const fn resolve(self, relative: RelativeDirection) -> Self {
        match relative {
            RelativeDirection::Forward => self,
            RelativeDirection::Backward => self.opposite(),
            RelativeDirection::Left => self.counter_clockwise(),
            RelativeDirection::Right => self.clockwise(),
        }
    }

    /// Express an absolute direction in terms relative to this heading.
    ///
    /// This is the inverse of [`Direction::resolve`]: for every heading `h`
    /// and relative direction `r`, `h.relative_from(h.resolve(r)) == r`.
    #[must_use]
    pub const fn relative_from(self, absolute: Self) -> RelativeDirection {
        match (self, absolute) {
            (Self::North, Self::North)
            | (Self::East, Self::East)
            | (Self::South, Self::South)
            | (Self::West, Self::West) => RelativeDirection::Forward,
            (Self::North, Self::South)
            | (Self::East, Self::West)
            | (Self::South, Self::North)
            | (Self::West, Self::East) => RelativeDirection::Backward,
            (Self::North, Self::West)
            | (Self::East, Self::North)
            | (Self::South, Self::East)
            | (Self::West, Self::South) => RelativeDirection::Left,
            (Self::North, Self::East)
            | (Self::East, Self::South)
            | (Self::South, Self::West)
            | (Self::West, Self::North) => RelativeDirection::Right,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        write!(f, "{name}")
    }
}

/// A movement command or sensor slot relative to the mouse's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDirection {
    /// The direction the mouse is facing.
    Forward,
    /// 180 degrees from the heading.
    Backward,
    /// 90 degrees counter-clockwise from the heading.
    Left,
    /// 90 degrees clockwise from the heading.
    Right,
}

impl RelativeDirection {
    /// All four relative directions.
    pub const ALL: [Self; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];
}

impl std::fmt::Display for RelativeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// Error returned when a relative-direction token cannot be parsed.
///
/// This is the `InvalidArgument` case of the engine's error taxonomy: the
/// transport layer parses incoming command tokens with
/// [`RelativeDirection::from_str`] and maps this error onto its own
/// 400-class response without touching any session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid relative direction: {token:?} (expected forward, backward, left, or right)")]
pub struct ParseDirectionError {
    /// The token that failed to parse.
    pub token: String,
}

impl FromStr for RelativeDirection {
    type Err = ParseDirectionError;

    /// Parse a relative-direction token.
    ///
    /// Accepts the canonical names plus `back` as an alias for `backward`,
    /// which is what wall-follower clients of the original server sent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "backward" | "back" => Ok(Self::Backward),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParseDirectionError {
                token: other.to_owned(),
            }),
        }
    }
}
