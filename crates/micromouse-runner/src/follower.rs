//! Left-wall follower: the classic micromouse strategy, driven entirely
//! through the engine facade.
//!
//! The follower sees exactly what any external client would see -- the
//! relative sensor reading -- and issues relative move commands in the
//! fixed preference order left, forward, right, backward. Keeping one paw
//! on the left wall walks the boundary of the passage tree, and in a
//! perfect maze (no cycles) that boundary walk visits every corridor, so
//! the goal is always found.
//!
//! The strategy lives in this client crate on purpose: the core engine
//! does not solve mazes.

use tracing::debug;

use micromouse_core::MazeService;
use micromouse_types::{MouseId, RelativeDirection, SolveToken};

use crate::error::RunnerError;

/// The relative directions a left-wall follower tries, in order.
pub const TURN_PREFERENCE: [RelativeDirection; 4] = [
    RelativeDirection::Left,
    RelativeDirection::Forward,
    RelativeDirection::Right,
    RelativeDirection::Backward,
];

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// Steps the follower executed in this run.
    pub steps: u64,
    /// The session's total move count (includes attempts from earlier
    /// runs with the same mouse name).
    pub moves: u64,
    /// The completion token the engine issued.
    pub token: SolveToken,
}

/// Drive `mouse` from the start cell to the goal.
///
/// Resets the mouse first so repeated runs with the same name behave the
/// same way, then follows the left wall until the goal is reached or the
/// step budget runs out.
///
/// # Errors
///
/// Returns [`RunnerError::StepLimit`] if the budget is exhausted,
/// [`RunnerError::WalledIn`] on a sensor reading with no open side, or
/// [`RunnerError::Engine`] if the engine refuses an operation.
pub fn solve(
    service: &MazeService,
    mouse: &MouseId,
    max_steps: u64,
) -> Result<SolveReport, RunnerError> {
    let start = service.reset_mouse(mouse)?;
    debug!(mouse = %mouse, position = %start.position, "run started");

    let mut steps: u64 = 0;
    loop {
        if steps >= max_steps {
            return Err(RunnerError::StepLimit { limit: max_steps });
        }

        let surroundings = service.query_surroundings(mouse)?;
        let Some(relative) = TURN_PREFERENCE
            .into_iter()
            .find(|candidate| !surroundings.wall(*candidate))
        else {
            let snapshot = service.mouse_snapshot(mouse)?;
            return Err(RunnerError::WalledIn {
                position: snapshot.position,
            });
        };

        let outcome = service.move_mouse(mouse, relative)?;
        steps = steps.saturating_add(1);
        debug!(
            step = steps,
            direction = %relative,
            position = %outcome.position,
            heading = %outcome.heading,
            "step"
        );

        if outcome.reached_goal {
            let token = match outcome.token {
                Some(token) => token,
                None => service.completion_token(mouse)?,
            };
            return Ok(SolveReport {
                steps,
                moves: outcome.moves,
                token,
            });
        }
    }
}
