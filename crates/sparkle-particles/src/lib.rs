//! Sparkle Particles - pooled firework particle simulation
//!
//! Provides the simulation behind every explosion on screen:
//! - Fixed-capacity dense pools, one per particle shape category
//! - Stable in-place compaction of expired particles
//! - Acceleration, gravity, exponential friction and cubic fade integration
//! - Bounded per-particle trails with a resampled spline curve
//! - Closed set of explosion pattern generators and rockets carrying recipes
//! - Fading spark trails behind climbing rockets
//! - Instance packing into one contiguous buffer for instanced draw calls

pub mod ascent;
pub mod category;
pub mod config;
pub mod curves;
pub mod emission;
pub mod integrator;
pub mod particle;
pub mod pattern;
pub mod rand;
pub mod recipe;
pub mod rocket;
pub mod system;
pub mod trail;

pub use ascent::{AscentTrail, Spark, TrailEffect};
pub use category::Category;
pub use config::{PatternGravities, SimulationConfig, TrailConfig};
pub use particle::{Particle, ParticleInstance, ParticlePool, ParticleSpawn};
pub use pattern::Pattern;
pub use recipe::{FireworkComponent, Recipe};
pub use rocket::Rocket;
pub use system::{DrawBatch, FrameReport, ParticleSystem, TrailView};
pub use trail::Trail;
