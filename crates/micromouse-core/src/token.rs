//! The single-issue completion-token issuer.
//!
//! A token is the proof that a mouse reached the goal. It is generated
//! exactly once per session, on the first issuance request after the goal
//! has been reached, and every later request returns the stored value
//! unchanged. Because the caller holds the session's exclusive lock while
//! issuing, the check-and-set on the token slot is atomic.
//!
//! Token values are random UUIDv4 ([`SolveToken::new`]); nothing about a
//! token is derivable from the mouse identifier, the maze seed, or the
//! move count.

use tracing::info;

use micromouse_types::SolveToken;

use crate::error::CoreError;
use crate::session::MouseSession;

/// Issues at most one completion token per solved session.
///
/// The issuer itself is stateless; the at-most-once guarantee lives in the
/// session's write-once token slot. Keeping issuance behind this type
/// leaves room to swap the random scheme for a keyed derivation without
/// touching the movement engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    /// Create a token issuer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Issue the completion token for a solved session.
    ///
    /// The first invocation after goal arrival generates and stores the
    /// token; every later invocation returns the same stored value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotSolved`] if the session has not reached
    /// the goal.
    pub fn issue(&self, session: &mut MouseSession) -> Result<SolveToken, CoreError> {
        if !session.is_solved() {
            return Err(CoreError::NotSolved(session.id().clone()));
        }

        if let Some(token) = session.token() {
            return Ok(token);
        }

        let token = SolveToken::new();
        session.store_token(token);
        info!(mouse = %session.id(), moves = session.moves(), "completion token issued");
        Ok(token)
    }
}
