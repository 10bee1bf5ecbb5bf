//! Configuration loading and typed config structures for a maze instance.
//!
//! The canonical configuration lives in `micromouse-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads the file. Every
//! section and field carries a default, so a missing file or a sparse one
//! yields a fully usable configuration.

use std::path::Path;

use serde::Deserialize;

use micromouse_maze::generator::{DEFAULT_MAZE_SIZE, GoalPlacement, MazeParams};
use micromouse_types::{Cell, Direction};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `micromouse-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Maze generation settings.
    #[serde(default)]
    pub maze: MazeConfig,

    /// Mouse session settings.
    #[serde(default)]
    pub mouse: MouseConfig,

    /// Demo-runner settings.
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yml::from_str(&contents)?;
        Ok(config)
    }
}

/// Maze generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MazeConfig {
    /// Grid side length.
    #[serde(default = "default_maze_size")]
    pub size: u16,

    /// Carving seed; omit for a fresh OS-entropy seed per instance.
    #[serde(default)]
    pub seed: Option<u64>,

    /// The start cell.
    #[serde(default = "default_start")]
    pub start: Cell,

    /// Goal placement policy.
    #[serde(default)]
    pub goal: GoalPlacement,
}

impl MazeConfig {
    /// The generator parameters this configuration describes.
    #[must_use]
    pub const fn params(&self) -> MazeParams {
        MazeParams {
            size: self.size,
            seed: self.seed,
            start: self.start,
            goal: self.goal,
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: default_maze_size(),
            seed: None,
            start: default_start(),
            goal: GoalPlacement::default(),
        }
    }
}

/// Mouse session settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MouseConfig {
    /// The heading every new session starts with.
    #[serde(default = "default_initial_heading")]
    pub initial_heading: Direction,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            initial_heading: default_initial_heading(),
        }
    }
}

/// Settings for the wall-follower demo runner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// The mouse name the runner drives.
    #[serde(default = "default_mouse_name")]
    pub mouse_name: String,

    /// Abort the run after this many steps without reaching the goal.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mouse_name: default_mouse_name(),
            max_steps: default_max_steps(),
        }
    }
}

const fn default_maze_size() -> u16 {
    DEFAULT_MAZE_SIZE
}

const fn default_start() -> Cell {
    Cell::new(0, 0)
}

const fn default_initial_heading() -> Direction {
    Direction::North
}

fn default_mouse_name() -> String {
    String::from("jerry")
}

const fn default_max_steps() -> u64 {
    10_000
}
