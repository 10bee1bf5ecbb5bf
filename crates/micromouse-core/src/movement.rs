//! Move resolution: validate a relative command against grid and session,
//! apply it, and report the outcome.
//!
//! The engine mirrors a physical robot that cannot strafe: a successful
//! move always leaves the mouse facing the direction it just traveled, so
//! the next relative command is interpreted in the new frame. A blocked
//! move changes nothing but the attempt counter.
//!
//! All mutation happens through the session the caller has already locked;
//! a rejected move never leaves a session half-updated because the wall
//! check precedes every write except the attempt count.

use tracing::{debug, info};

use micromouse_maze::Grid;
use micromouse_types::{MoveOutcome, RelativeDirection};

use crate::error::CoreError;
use crate::session::MouseSession;
use crate::token::TokenIssuer;

/// Validate and apply one relative move.
///
/// Resolves `relative` to an absolute direction under the session's
/// current heading, consults the grid for a wall, and either blocks
/// (position and heading unchanged) or advances the mouse and turns it to
/// face the direction of travel. Landing on the goal cell marks the
/// session solved and issues its completion token on first arrival; the
/// token rides along in the outcome whenever a move lands on the goal.
///
/// The attempt counter increments for blocked and successful moves alike.
///
/// # Errors
///
/// Returns [`CoreError::StatePoisoned`] only through the token issuer's
/// internal invariants; wall collisions are not errors and come back as
/// `success == false`.
pub fn step(
    grid: &Grid,
    issuer: &TokenIssuer,
    session: &mut MouseSession,
    relative: RelativeDirection,
) -> Result<MoveOutcome, CoreError> {
    let heading = session.heading();
    let position = session.position();
    let absolute = heading.resolve(relative);
    session.record_attempt();

    let Some(next) = grid.open_neighbor(position, absolute) else {
        debug!(
            mouse = %session.id(),
            position = %position,
            heading = %heading,
            relative = %relative,
            absolute = %absolute,
            "move blocked by wall"
        );
        return Ok(MoveOutcome {
            success: false,
            position,
            heading,
            surroundings: grid.relative_walls(position, heading),
            solved: session.is_solved(),
            reached_goal: false,
            moves: session.moves(),
            token: None,
        });
    };

    session.apply_move(next, absolute);
    let reached_goal = grid.is_goal(next);

    if reached_goal && !session.is_solved() {
        session.mark_solved();
        info!(
            mouse = %session.id(),
            moves = session.moves(),
            "goal reached"
        );
    }

    let token = if reached_goal {
        Some(issuer.issue(session)?)
    } else {
        None
    };

    debug!(
        mouse = %session.id(),
        from = %position,
        to = %next,
        heading = %absolute,
        reached_goal,
        "move applied"
    );

    Ok(MoveOutcome {
        success: true,
        position: next,
        heading: absolute,
        surroundings: grid.relative_walls(next, absolute),
        solved: session.is_solved(),
        reached_goal,
        moves: session.moves(),
        token,
    })
}

#[cfg(test)]
mod tests {
    use micromouse_maze::{GoalPlacement, MazeParams, generate};
    use micromouse_types::{Cell, Direction, MouseId};

    use super::*;

    fn small_maze() -> Option<Grid> {
        generate(&MazeParams {
            size: 5,
            seed: Some(11),
            start: Cell::new(0, 0),
            goal: GoalPlacement::FarCorner,
        })
        .ok()
    }

    fn session_at_start(grid: &Grid) -> MouseSession {
        MouseSession::new(MouseId::from("m"), grid.start(), Direction::North)
    }

    #[test]
    fn blocked_moves_are_idempotent() {
        let grid = small_maze();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        let issuer = TokenIssuer::new();
        let mut session = session_at_start(&grid);

        // Heading north at the origin, left resolves to west: the grid
        // boundary. Repeat the attempt; nothing but the counter moves.
        for attempt in 1..=5u64 {
            let outcome = step(&grid, &issuer, &mut session, RelativeDirection::Left).ok();
            assert!(outcome.is_some());
            let Some(outcome) = outcome else {
                return;
            };
            assert!(!outcome.success);
            assert_eq!(outcome.position, grid.start());
            assert_eq!(outcome.heading, Direction::North);
            assert_eq!(outcome.moves, attempt);
            assert!(!outcome.reached_goal);
            assert_eq!(outcome.token, None);
        }
    }

    #[test]
    fn successful_move_turns_the_mouse() {
        let grid = small_maze();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        let issuer = TokenIssuer::new();
        let mut session = session_at_start(&grid);

        // Find an open absolute direction from the start and express it
        // relative to the current heading.
        let open = Direction::ALL
            .into_iter()
            .find(|direction| !grid.wall(grid.start(), *direction));
        assert!(open.is_some());
        let Some(open) = open else {
            return;
        };
        let relative = session.heading().relative_from(open);

        let outcome = step(&grid, &issuer, &mut session, relative).ok();
        assert!(outcome.is_some());
        let Some(outcome) = outcome else {
            return;
        };
        assert!(outcome.success);
        assert_eq!(outcome.heading, open);
        assert_eq!(session.heading(), open);
        assert_eq!(Some(outcome.position), grid.neighbor(grid.start(), open));
    }

    #[test]
    fn surroundings_in_the_outcome_match_the_grid() {
        let grid = small_maze();
        assert!(grid.is_some());
        let Some(grid) = grid else {
            return;
        };
        let issuer = TokenIssuer::new();
        let mut session = session_at_start(&grid);

        let outcome = step(&grid, &issuer, &mut session, RelativeDirection::Backward).ok();
        assert!(outcome.is_some());
        let Some(outcome) = outcome else {
            return;
        };
        assert_eq!(
            outcome.surroundings,
            grid.relative_walls(session.position(), session.heading())
        );
    }
}
