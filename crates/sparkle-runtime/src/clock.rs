//! Game clock with frame delta clamping

use std::time::Instant;

/// Longest frame delta handed to systems, in seconds
const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks frame time for the simulation loop.
///
/// `tick` reads the wall clock (real-time runs), `advance` feeds an explicit
/// delta (headless runs and tests). Both clamp the delta.
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames advanced so far
    pub frame_count: u64,
    last_instant: Option<Instant>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: None,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per frame.
    ///
    /// Returns the delta to simulate this frame. The first tick only starts
    /// the clock and returns zero.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        match self.last_instant.replace(now) {
            Some(last) => self.advance(now.duration_since(last).as_secs_f64()),
            None => {
                self.delta_time = 0.0;
                0.0
            }
        }
    }

    /// Advance the clock by an explicit delta.
    ///
    /// Returns the delta to simulate this frame: `delta` clamped to
    /// [0, 0.25] seconds.
    pub fn advance(&mut self, delta: f64) -> f64 {
        self.delta_time = delta.clamp(0.0, MAX_FRAME_DELTA);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = GameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count, 0);
    }

    #[test]
    fn test_tick_measures_wall_time() {
        let mut clock = GameClock::new();
        clock.tick();
        std::thread::sleep(Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt >= 0.005);
        assert!(dt <= MAX_FRAME_DELTA);
        assert_eq!(clock.frame_count, 1);
        assert_eq!(clock.total_time, dt);
    }

    #[test]
    fn test_advance_clamps_long_frames() {
        let mut clock = GameClock::new();
        let dt = clock.advance(3.0);
        assert!((dt - 0.25).abs() < 1e-12);
        assert!((clock.total_time - 0.25).abs() < 1e-12);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.frame_count, 2);
    }
}
