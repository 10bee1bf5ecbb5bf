//! The mouse-id to session store.
//!
//! The registry guarantees at-most-one session object per mouse identifier
//! for the lifetime of the maze instance. Lookups take a read lock on the
//! map; creation takes the write lock and re-checks through the entry API,
//! so two near-simultaneous first references to the same identifier cannot
//! race into two sessions.
//!
//! Each stored session sits behind its own [`Mutex`], making the session
//! the unit of exclusion: concurrent requests for the same mouse serialize
//! on that lock while requests for different mice proceed independently.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use micromouse_types::{Cell, Direction, MouseId};

use crate::error::CoreError;
use crate::session::MouseSession;

/// A handle to one mouse's session, lockable independently of every other
/// session.
pub type SessionHandle = Arc<Mutex<MouseSession>>;

/// Concurrency-safe store mapping mouse identifiers to sessions.
#[derive(Debug)]
pub struct SessionRegistry {
    /// Where new sessions are born.
    start: Cell,
    /// The heading new sessions face.
    initial_heading: Direction,
    /// The sessions, keyed by mouse identifier.
    sessions: RwLock<BTreeMap<MouseId, SessionHandle>>,
}

impl SessionRegistry {
    /// Create an empty registry whose sessions begin at `start` facing
    /// `initial_heading`.
    pub const fn new(start: Cell, initial_heading: Direction) -> Self {
        Self {
            start,
            initial_heading,
            sessions: RwLock::new(BTreeMap::new()),
        }
    }

    /// The cell new sessions are born in.
    #[must_use]
    pub const fn start(&self) -> Cell {
        self.start
    }

    /// The heading new sessions face.
    #[must_use]
    pub const fn initial_heading(&self) -> Direction {
        self.initial_heading
    }

    /// Look up the session for `id`, creating it at the start cell if the
    /// identifier is new.
    ///
    /// Check-and-create is atomic: the insert happens under the write
    /// lock through the entry API, so concurrent first references yield
    /// the same session object.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if the registry lock is
    /// poisoned.
    pub fn get_or_create(&self, id: &MouseId) -> Result<SessionHandle, CoreError> {
        // Fast path: the session already exists.
        {
            let sessions = self.sessions.read().map_err(|_| CoreError::StatePoisoned)?;
            if let Some(handle) = sessions.get(id) {
                return Ok(Arc::clone(handle));
            }
        }

        let mut sessions = self.sessions.write().map_err(|_| CoreError::StatePoisoned)?;
        let handle = sessions.entry(id.clone()).or_insert_with(|| {
            debug!(mouse = %id, start = %self.start, "session created");
            Arc::new(Mutex::new(MouseSession::new(
                id.clone(),
                self.start,
                self.initial_heading,
            )))
        });
        Ok(Arc::clone(handle))
    }

    /// Look up the session for `id` without creating one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if the registry lock is
    /// poisoned.
    pub fn get(&self, id: &MouseId) -> Result<Option<SessionHandle>, CoreError> {
        let sessions = self.sessions.read().map_err(|_| CoreError::StatePoisoned)?;
        Ok(sessions.get(id).map(Arc::clone))
    }

    /// The number of sessions in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if the registry lock is
    /// poisoned.
    pub fn len(&self) -> Result<usize, CoreError> {
        let sessions = self.sessions.read().map_err(|_| CoreError::StatePoisoned)?;
        Ok(sessions.len())
    }

    /// Whether the registry holds no sessions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if the registry lock is
    /// poisoned.
    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }

    /// All known mouse identifiers, in key order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StatePoisoned`] if the registry lock is
    /// poisoned.
    pub fn mouse_ids(&self) -> Result<Vec<MouseId>, CoreError> {
        let sessions = self.sessions.read().map_err(|_| CoreError::StatePoisoned)?;
        Ok(sessions.keys().cloned().collect())
    }
}
