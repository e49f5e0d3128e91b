//! CLI command implementations

pub mod check;
pub mod patterns;
pub mod simulate;

use anyhow::{Context, Result};
use sparkle_particles::SimulationConfig;

/// Load a config file, or fall back to defaults when none is given
pub fn load_config(path: Option<&str>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Ok(SimulationConfig::default()),
    }
}
