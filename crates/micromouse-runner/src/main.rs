//! Demo runner for the Micromouse engine.
//!
//! Builds a maze instance from `micromouse-config.yaml`, then drives a
//! left-wall-follower mouse through the engine facade until it reaches
//! the goal and collects its completion token. The runner is an ordinary
//! client of the engine: it sees only relative sensor readings and issues
//! only relative move commands, exactly like a remote player would.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `micromouse-config.yaml`
//! 3. Generate the maze and assemble the engine service
//! 4. Run the wall follower
//! 5. Log the result and the completion token

mod error;
mod follower;

use std::path::Path;

use micromouse_core::{EngineConfig, MazeService};
use micromouse_types::MouseId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;

/// Application entry point for the demo runner.
///
/// # Errors
///
/// Returns an error if configuration loading, maze generation, or the
/// run itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("micromouse-runner starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        size = config.maze.size,
        seed = config.maze.seed,
        mouse = config.runner.mouse_name,
        max_steps = config.runner.max_steps,
        "Configuration loaded"
    );

    // 3. Generate the maze and assemble the engine service.
    let service = MazeService::from_config(&config)?;
    let maze = service.maze_info();
    info!(
        size = maze.size,
        start = %maze.start,
        goal = %maze.goal,
        "Maze instance ready"
    );

    // 4. Run the wall follower.
    let mouse = MouseId::new(config.runner.mouse_name.clone());
    let report = follower::solve(&service, &mouse, config.runner.max_steps)?;

    // 5. Log the result and the completion token.
    info!(
        mouse = %mouse,
        steps = report.steps,
        moves = report.moves,
        token = %report.token,
        "maze solved"
    );

    Ok(())
}

/// Load the runner configuration from `micromouse-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it is absent.
fn load_config() -> Result<EngineConfig, RunnerError> {
    let config_path = Path::new("micromouse-config.yaml");
    if config_path.exists() {
        let config = EngineConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(EngineConfig::default())
    }
}
