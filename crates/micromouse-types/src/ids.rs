//! Identifier newtypes for the Micromouse engine.
//!
//! Mice are identified by a client-chosen name (the registry key), and a
//! solved session is rewarded with a completion token. Both are wrapped in
//! newtypes so the two string-shaped values can never be mixed up at a call
//! site.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The client-chosen name identifying one mouse session.
///
/// Sessions are keyed by this name for the lifetime of a maze instance;
/// the first operation referencing an unknown name creates the session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MouseId(String);

impl MouseId {
    /// Create a mouse identifier from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MouseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MouseId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for MouseId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The one-time completion token issued when a mouse first reaches the goal.
///
/// Tokens are random UUIDv4 values: 122 bits of OS-backed randomness, so a
/// token cannot be predicted from the mouse name, the maze seed, or the move
/// count. The time-ordered v7 variant is deliberately *not* used here -- it
/// embeds a timestamp, and the whole point of the token is unguessability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolveToken(Uuid);

impl SolveToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SolveToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolveToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
