//! The per-mouse session state machine.
//!
//! A [`MouseSession`] tracks one mouse's position, heading, move counter,
//! and progress flags for the lifetime of a maze instance. The two flags
//! are monotonic: `solved` never reverts once set, and the token slot is
//! written at most once. The lifecycle phase (`Active` -> `Solved` ->
//! `Completed`) is derived from those flags rather than stored, so an
//! inconsistent phase cannot exist.
//!
//! Sessions are owned exclusively by their registry entry and mutated only
//! behind that entry's lock; nothing in this module is aware of
//! concurrency.

use chrono::{DateTime, Utc};
use micromouse_types::{Cell, Direction, MouseId, MousePhase, MouseSnapshot, SolveToken};

/// Mutable state for one mouse navigating the maze.
#[derive(Debug, Clone)]
pub struct MouseSession {
    /// The client-chosen identifier this session is keyed by.
    id: MouseId,
    /// Current cell.
    position: Cell,
    /// Current absolute heading. Updated to the direction of travel on
    /// every successful move; a mouse always faces the way it last moved.
    heading: Direction,
    /// Move attempts recorded, blocked ones included.
    moves: u64,
    /// Whether the goal has ever been reached. Monotonic.
    solved: bool,
    /// The completion token, set at most once on first goal arrival.
    token: Option<SolveToken>,
    /// When the session was created.
    created_at: DateTime<Utc>,
}

impl MouseSession {
    /// Create a session at the maze start with the configured initial
    /// heading.
    pub fn new(id: MouseId, start: Cell, heading: Direction) -> Self {
        Self {
            id,
            position: start,
            heading,
            moves: 0,
            solved: false,
            token: None,
            created_at: Utc::now(),
        }
    }

    /// The session's mouse identifier.
    #[must_use]
    pub const fn id(&self) -> &MouseId {
        &self.id
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Current absolute heading.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Total move attempts, blocked ones included.
    #[must_use]
    pub const fn moves(&self) -> u64 {
        self.moves
    }

    /// Whether the goal has ever been reached.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// The issued completion token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<SolveToken> {
        self.token
    }

    /// The lifecycle phase derived from the monotonic flags.
    #[must_use]
    pub const fn phase(&self) -> MousePhase {
        match (self.solved, self.token) {
            (false, _) => MousePhase::Active,
            (true, None) => MousePhase::Solved,
            (true, Some(_)) => MousePhase::Completed,
        }
    }

    /// Count one move attempt. Called for blocked and successful moves
    /// alike; attempts are what the counter measures.
    pub(crate) fn record_attempt(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    /// Apply a successful move: the mouse occupies `to` and faces the
    /// absolute direction it just traveled.
    pub(crate) const fn apply_move(&mut self, to: Cell, traveled: Direction) {
        self.position = to;
        self.heading = traveled;
    }

    /// Set the monotonic solved flag.
    pub(crate) const fn mark_solved(&mut self) {
        self.solved = true;
    }

    /// Store the completion token. The first write wins; later calls are
    /// ignored so the token can never be replaced.
    pub(crate) fn store_token(&mut self, token: SolveToken) {
        if self.token.is_none() {
            self.token = Some(token);
        }
    }

    /// Return the mouse to `start` facing `heading`, zeroing the move
    /// counter.
    ///
    /// `solved` and the issued token survive a reset: both are monotonic
    /// by contract, and a mouse that has earned its token keeps it.
    pub(crate) const fn reset(&mut self, start: Cell, heading: Direction) {
        self.position = start;
        self.heading = heading;
        self.moves = 0;
    }

    /// A read-only snapshot for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> MouseSnapshot {
        MouseSnapshot {
            id: self.id.clone(),
            position: self.position,
            heading: self.heading,
            moves: self.moves,
            solved: self.solved,
            token_issued: self.token.is_some(),
            phase: self.phase(),
            created_at: self.created_at,
        }
    }
}
