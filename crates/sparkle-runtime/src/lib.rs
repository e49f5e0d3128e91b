//! Sparkle Runtime - Frame loop infrastructure
//!
//! Provides the frame loop building blocks:
//! - `GameClock`: wall-clock or explicit frame deltas, clamped
//! - `RuntimeSystem`: trait for systems ticked once per frame

mod clock;
mod system;

pub use clock::GameClock;
pub use system::RuntimeSystem;
