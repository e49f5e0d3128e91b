//! Simulation configuration, owned by each `ParticleSystem` instance.
//!
//! Loaded from TOML; every field has a default so partial files work.

use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use sparkle_core::{Result, SparkleError};
use std::path::Path;

/// Largest per-category pool `validate` accepts
pub const MAX_POOL_CAPACITY: usize = 1 << 18;

/// Trail tracker tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Seconds between trail updates, independent of frame rate
    pub update_interval: f64,
    /// Bounded history length (FIFO)
    pub max_points: usize,
    /// Normalized age below which trails stop growing and start retracting
    pub retraction_threshold: f32,
    /// Resampled curve segment count
    pub curve_segments: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.05,
            max_points: 8,
            retraction_threshold: 0.5,
            curve_segments: 16,
        }
    }
}

/// Base gravity per explosion pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternGravities {
    pub spherical: f32,
    pub ring: f32,
    pub burst: f32,
    pub palm: f32,
    pub willow: f32,
    pub heart: f32,
    pub broken_heart: f32,
    pub helix: f32,
    pub star: f32,
    pub christmas_tree: f32,
    /// Used by the fallback pattern
    pub default: f32,
}

impl Default for PatternGravities {
    fn default() -> Self {
        Self {
            spherical: 9.81,
            ring: 8.0,
            burst: 9.81,
            palm: 5.0,
            willow: 1.0,
            heart: 6.0,
            broken_heart: 6.0,
            helix: 3.0,
            star: 7.0,
            christmas_tree: 7.0,
            default: 9.81,
        }
    }
}

impl PatternGravities {
    pub fn for_pattern(&self, pattern: Pattern) -> f32 {
        match pattern {
            Pattern::Spherical => self.spherical,
            Pattern::Ring => self.ring,
            Pattern::Burst => self.burst,
            Pattern::Palm => self.palm,
            Pattern::Willow => self.willow,
            Pattern::Heart => self.heart,
            Pattern::BrokenHeart => self.broken_heart,
            Pattern::Helix => self.helix,
            Pattern::Star => self.star,
            Pattern::ChristmasTree => self.christmas_tree,
            Pattern::Scatter => self.default,
        }
    }
}

/// Tunables for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Capacity of each category pool
    pub max_particles: usize,
    /// Burst speed per unit of component size
    pub base_speed: f32,
    /// Particle scale per unit of component size
    pub particle_size: f32,
    /// Particles per unit of component size
    pub particle_density: f32,
    /// Rocket climb rate in units per second
    pub ascent_speed: f32,
    /// Rockets explode at a height drawn from this range
    pub min_explosion_y: f32,
    pub max_explosion_y: f32,
    /// Seed for pattern and rocket jitter
    pub seed: u32,
    pub pattern_gravities: PatternGravities,
    pub trail: TrailConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_particles: 10_000,
            base_speed: 10.0,
            particle_size: 1.0,
            particle_density: 100.0,
            ascent_speed: 40.0,
            min_explosion_y: -10.0,
            max_explosion_y: 30.0,
            seed: 0xDEAD_BEEF,
            pattern_gravities: PatternGravities::default(),
            trail: TrailConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Trails are budgeted across all categories at twice the pool capacity
    pub fn trail_budget(&self) -> usize {
        self.max_particles.saturating_mul(2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_particles == 0 {
            return Err(SparkleError::ConfigError(
                "max_particles must be at least 1".into(),
            ));
        }
        if self.max_particles > MAX_POOL_CAPACITY {
            return Err(SparkleError::ValueOutOfRange {
                field: "max_particles".into(),
                min: 1.0,
                max: MAX_POOL_CAPACITY as f64,
                value: self.max_particles as f64,
            });
        }
        if !(self.ascent_speed.is_finite() && self.ascent_speed > 0.0) {
            return Err(SparkleError::ConfigError(format!(
                "ascent_speed must be positive and finite, got {}",
                self.ascent_speed
            )));
        }
        if !(self.min_explosion_y.is_finite() && self.max_explosion_y.is_finite()) {
            return Err(SparkleError::ConfigError(
                "explosion height bounds must be finite".into(),
            ));
        }
        if self.min_explosion_y > self.max_explosion_y {
            return Err(SparkleError::ConfigError(format!(
                "min_explosion_y ({}) exceeds max_explosion_y ({})",
                self.min_explosion_y, self.max_explosion_y
            )));
        }
        if !(self.trail.update_interval > 0.0) {
            return Err(SparkleError::ConfigError(
                "trail.update_interval must be positive".into(),
            ));
        }
        if self.trail.max_points < 2 {
            return Err(SparkleError::ConfigError(
                "trail.max_points must be at least 2".into(),
            ));
        }
        let threshold = self.trail.retraction_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(SparkleError::ValueOutOfRange {
                field: "trail.retraction_threshold".into(),
                min: 0.0,
                max: 1.0,
                value: threshold as f64,
            });
        }
        Ok(())
    }
}
