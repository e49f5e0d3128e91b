//! Runtime system trait

use sparkle_core::Result;

/// A system that can be ticked by the frame loop
///
/// There is a single thread of control: `update` runs once per rendered
/// frame and nothing else mutates the system while it runs.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame with the clamped frame delta in seconds
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the system is being torn down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
