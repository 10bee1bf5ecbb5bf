//! Session state, movement engine, and facade for the Micromouse maze.
//!
//! This crate owns the mutable side of the engine: per-mouse sessions, the
//! concurrency-safe registry that stores them, the movement engine that
//! validates and applies relative moves against the shared [`Grid`], the
//! single-issue completion-token issuer, and the [`MazeService`] facade the
//! transport layer calls.
//!
//! The core is synchronous: every facade operation completes in bounded
//! time without I/O, and concurrency is handled with plain `std::sync`
//! locks (one exclusive lock per session, a read-write lock on the
//! registry map). An async transport layer can wrap calls however it
//! likes; nothing in here suspends.
//!
//! # Modules
//!
//! - [`config`] -- Typed YAML configuration for a maze instance.
//! - [`error`] -- [`CoreError`], the engine's error taxonomy.
//! - [`movement`] -- Move resolution against grid and session.
//! - [`registry`] -- Mouse-id to session store with atomic get-or-create.
//! - [`service`] -- [`MazeService`], the narrow facade of the engine.
//! - [`session`] -- The per-mouse state machine.
//! - [`token`] -- The single-issue completion-token issuer.
//!
//! [`Grid`]: micromouse_maze::Grid

pub mod config;
pub mod error;
pub mod movement;
pub mod registry;
pub mod service;
pub mod session;
pub mod token;

// Re-export primary types at crate root.
pub use config::{ConfigError, EngineConfig, MazeConfig, MouseConfig, RunnerConfig};
pub use error::CoreError;
pub use registry::SessionRegistry;
pub use service::MazeService;
pub use session::MouseSession;
pub use token::TokenIssuer;
