//! The engine facade called by the transport layer.
//!
//! [`MazeService`] bundles one immutable [`Grid`] with the mutable session
//! state for its mice and exposes the narrow operation set a transport
//! layer binds routes to. The service is an explicitly owned value, not a
//! module-level singleton: construct it once at startup, share it behind
//! whatever the transport prefers (`Arc`, app state, a test fixture), and
//! multiple independent maze instances can coexist in one process.
//!
//! # Session-creation policy
//!
//! `query_surroundings`, `move_mouse`, and `reset_mouse` get-or-create the
//! session: the first reference to an unknown mouse name places a new
//! mouse at the start cell, which is how the original server behaved.
//! The diagnostic operations (`mouse_snapshot`, `completion_token`) are
//! strictly lookup-only and answer [`CoreError::MouseNotFound`] for
//! unknown names. The policy never varies by code path.

use std::sync::{Arc, MutexGuard};

use micromouse_maze::{Grid, generate};
use micromouse_types::{
    Direction, MazeInfo, MouseId, MouseSnapshot, MoveOutcome, RelativeDirection, SolveToken,
    SurroundingsView,
};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::movement;
use crate::registry::{SessionHandle, SessionRegistry};
use crate::session::MouseSession;
use crate::token::TokenIssuer;

/// One maze instance and the sessions navigating it.
#[derive(Debug)]
pub struct MazeService {
    /// The maze, shared read-only by every session.
    grid: Arc<Grid>,
    /// The per-mouse sessions.
    registry: SessionRegistry,
    /// The completion-token issuer.
    issuer: TokenIssuer,
}

impl MazeService {
    /// Wrap an already-generated grid. New sessions start at the grid's
    /// start cell facing `initial_heading`.
    #[must_use]
    pub fn new(grid: Grid, initial_heading: Direction) -> Self {
        let start = grid.start();
        Self {
            grid: Arc::new(grid),
            registry: SessionRegistry::new(start, initial_heading),
            issuer: TokenIssuer::new(),
        }
    }

    /// Generate a maze from configuration and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Maze`] if the maze parameters are rejected.
    pub fn from_config(config: &EngineConfig) -> Result<Self, CoreError> {
        let grid = generate(&config.maze.params())?;
        Ok(Self::new(grid, config.mouse.initial_heading))
    }

    /// The underlying grid. Operator-side only: handing this to a client
    /// would reveal the walls.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Diagnostic summary of the maze: size, start, and goal. Never the
    /// wall layout.
    #[must_use]
    pub fn maze_info(&self) -> MazeInfo {
        MazeInfo {
            size: self.grid.size(),
            start: self.grid.start(),
            goal: self.grid.goal(),
        }
    }

    /// The sensor reading for a mouse, creating its session if the name
    /// is new.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if a state lock is poisoned.
    pub fn query_surroundings(&self, id: &MouseId) -> Result<SurroundingsView, CoreError> {
        let handle = self.registry.get_or_create(id)?;
        let session = lock(&handle)?;
        Ok(self
            .grid
            .relative_walls(session.position(), session.heading()))
    }

    /// Validate and apply one relative move for a mouse, creating its
    /// session if the name is new.
    ///
    /// A wall collision is a successful call with `success == false` in
    /// the outcome; see [`movement::step`] for the full semantics.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if a state lock is poisoned.
    pub fn move_mouse(
        &self,
        id: &MouseId,
        relative: RelativeDirection,
    ) -> Result<MoveOutcome, CoreError> {
        let handle = self.registry.get_or_create(id)?;
        let mut session = lock(&handle)?;
        movement::step(&self.grid, &self.issuer, &mut session, relative)
    }

    /// Return a mouse to the start cell with the initial heading and a
    /// zeroed move counter, creating its session if the name is new.
    ///
    /// The solved flag and any issued token survive: both are monotonic.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if a state lock is poisoned.
    pub fn reset_mouse(&self, id: &MouseId) -> Result<MouseSnapshot, CoreError> {
        let handle = self.registry.get_or_create(id)?;
        let mut session = lock(&handle)?;
        session.reset(self.registry.start(), self.registry.initial_heading());
        Ok(session.snapshot())
    }

    /// A read-only diagnostic view of one session. Does not create
    /// sessions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MouseNotFound`] for unknown names, or
    /// [`CoreError::StatePoisoned`] if a state lock is poisoned.
    pub fn mouse_snapshot(&self, id: &MouseId) -> Result<MouseSnapshot, CoreError> {
        let handle = self
            .registry
            .get(id)?
            .ok_or_else(|| CoreError::MouseNotFound(id.clone()))?;
        let session = lock(&handle)?;
        Ok(session.snapshot())
    }

    /// All known mouse identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if the registry lock is
    /// poisoned.
    pub fn mouse_ids(&self) -> Result<Vec<MouseId>, CoreError> {
        self.registry.mouse_ids()
    }

    /// The completion token for a solved mouse. Idempotent: the first
    /// call after goal arrival issues the token, every later call
    /// returns the same value. Does not create sessions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MouseNotFound`] for unknown names,
    /// [`CoreError::NotSolved`] before goal arrival, or
    /// [`CoreError::StatePoisoned`] if a state lock is poisoned.
    pub fn completion_token(&self, id: &MouseId) -> Result<SolveToken, CoreError> {
        let handle = self
            .registry
            .get(id)?
            .ok_or_else(|| CoreError::MouseNotFound(id.clone()))?;
        let mut session = lock(&handle)?;
        self.issuer.issue(&mut session)
    }
}

/// Acquire a session's exclusive lock, surfacing poisoning as a value.
fn lock(handle: &SessionHandle) -> Result<MutexGuard<'_, MouseSession>, CoreError> {
    handle.lock().map_err(|_| CoreError::StatePoisoned)
}
