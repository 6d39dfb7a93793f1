//! Dot Survivor entry point
//!
//! Sets up logging, tuning and the terminal frontend, then runs one game.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use glam::Vec2;

use dot_survivor::platform::TerminalPlatform;
use dot_survivor::renderer::TerminalRenderer;
use dot_survivor::{Game, RunEnd, Tuning};

/// Fixes the run seed for reproducible runs
const SEED_ENV_VAR: &str = "DOT_SURVIVOR_SEED";

fn run_seed() -> anyhow::Result<u64> {
    match std::env::var(SEED_ENV_VAR) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{SEED_ENV_VAR} must be an unsigned integer, got {value:?}")),
        Err(_) => Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Dot Survivor starting...");

    let tuning = Tuning::from_env().context("failed to load tuning")?;
    let seed = run_seed()?;
    let screen = Vec2::new(tuning.screen_width, tuning.screen_height);

    let platform = TerminalPlatform::new(screen).context("failed to set up terminal")?;
    let renderer = TerminalRenderer::stdout(screen).context("failed to set up renderer")?;
    let mut game = Game::new(platform, renderer, tuning, seed);
    let result = game.run();

    // Restore the terminal before printing anything
    drop(game);
    let outcome = result.context("game loop failed")?;

    log::info!("Run summary: {}", serde_json::to_string(&outcome)?);
    match outcome.end {
        RunEnd::Died => println!("Game over! Final score: {}", outcome.score),
        RunEnd::Quit => println!("Quit with score {}", outcome.score),
    }
    Ok(())
}
