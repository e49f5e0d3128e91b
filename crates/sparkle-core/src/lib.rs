//! Sparkle Core - Foundational types for the Sparkle fireworks engine
//!
//! This crate provides the types that all other Sparkle crates depend on:
//! - `Vec3`, `Quat`, `Color` - Spatial and color types
//! - `spline` - Catmull-Rom curve sampling used by particle trails
//! - Error types and Result alias

mod error;
pub mod spline;
mod types;

pub use error::{Result, SparkleError};
pub use types::{Color, Quat, Vec3};
