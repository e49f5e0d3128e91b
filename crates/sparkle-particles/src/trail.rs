//! Bounded position history behind a moving particle, plus the smooth
//! curve the renderer draws through it.

use crate::config::TrailConfig;
use crate::curves::retraction_fraction;
use sparkle_core::spline::sample_open_curve;
use sparkle_core::Vec3;
use std::collections::VecDeque;

/// Trail record owned by a particle
#[derive(Debug, Clone)]
pub struct Trail {
    /// Absolute positions, oldest first
    points: VecDeque<Vec3>,
    capacity: usize,
    last_update: f64,
    /// `first - last` point offset
    anchor: Vec3,
    /// Resampled curve, relative to the first point
    curve: Vec<Vec3>,
    curve_fraction: f32,
    opacity: f32,
}

impl Trail {
    /// Start a trail at the particle's spawn position
    pub fn new(origin: Vec3, now: f64, config: &TrailConfig) -> Self {
        let capacity = config.max_points.max(2);
        let mut points = VecDeque::with_capacity(capacity + 1);
        points.push_back(origin);
        Self {
            points,
            capacity,
            last_update: now,
            anchor: Vec3::ZERO,
            curve: Vec::with_capacity(config.curve_segments + 1),
            curve_fraction: 1.0,
            opacity: 1.0,
        }
    }

    /// Append a point, evicting the oldest beyond capacity
    pub fn push_point(&mut self, point: Vec3) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Advance the trail if its update interval has elapsed.
    ///
    /// Returns `true` when an update happened.
    pub fn update(
        &mut self,
        position: Vec3,
        normalized_age: f32,
        now: f64,
        config: &TrailConfig,
    ) -> bool {
        if now - self.last_update < config.update_interval {
            return false;
        }
        self.last_update = now;

        let threshold = config.retraction_threshold;
        if normalized_age >= threshold {
            self.push_point(position);
        }
        self.recompute_anchor();
        self.regenerate_curve(
            retraction_fraction(normalized_age, threshold),
            config.curve_segments,
        );
        self.opacity = normalized_age;
        true
    }

    fn recompute_anchor(&mut self) {
        if let (Some(first), Some(last)) = (self.points.front(), self.points.back()) {
            self.anchor = *first - *last;
        }
    }

    /// Refit the curve through the history. Needs at least two points.
    fn regenerate_curve(&mut self, fraction: f32, segments: usize) {
        let Some(&origin) = self.points.front() else {
            return;
        };
        if self.points.len() < 2 {
            return;
        }
        let relative: Vec<Vec3> = self.points.iter().map(|p| *p - origin).collect();
        self.curve = sample_open_curve(&relative, segments, fraction);
        self.curve_fraction = fraction;
    }

    pub fn points(&self) -> &VecDeque<Vec3> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest recorded position; curve geometry is relative to it
    pub fn origin(&self) -> Vec3 {
        self.points.front().copied().unwrap_or(Vec3::ZERO)
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn curve(&self) -> &[Vec3] {
        &self.curve
    }

    pub fn curve_fraction(&self) -> f32 {
        self.curve_fraction
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::spline::polyline_length;

    fn config() -> TrailConfig {
        TrailConfig::default()
    }

    #[test]
    fn fifo_keeps_newest_k_points() {
        let cfg = config();
        let mut trail = Trail::new(Vec3::ZERO, 0.0, &cfg);
        for i in 1..=20 {
            trail.push_point(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert_eq!(trail.len(), cfg.max_points);
        let xs: Vec<f32> = trail.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0]);
    }

    #[test]
    fn respects_update_interval() {
        let cfg = config();
        let mut trail = Trail::new(Vec3::ZERO, 0.0, &cfg);
        assert!(!trail.update(Vec3::new(1.0, 0.0, 0.0), 1.0, 0.02, &cfg));
        assert_eq!(trail.len(), 1);
        assert!(trail.update(Vec3::new(1.0, 0.0, 0.0), 1.0, 0.05, &cfg));
        assert_eq!(trail.len(), 2);
        assert!(!trail.update(Vec3::new(2.0, 0.0, 0.0), 1.0, 0.08, &cfg));
        assert_eq!(trail.last_update(), 0.05);
    }

    #[test]
    fn growth_builds_full_curve_and_anchor() {
        let cfg = config();
        let mut trail = Trail::new(Vec3::new(10.0, 10.0, 0.0), 0.0, &cfg);
        trail.update(Vec3::new(10.0, 14.0, 0.0), 0.9, 0.05, &cfg);

        assert_eq!(trail.anchor(), Vec3::new(0.0, -4.0, 0.0));
        assert_eq!(trail.curve().len(), cfg.curve_segments + 1);
        assert_eq!(trail.curve_fraction(), 1.0);
        // Relative to the first point
        assert!(trail.curve()[0].length() < 1e-6);
        assert!((polyline_length(trail.curve()) - 4.0).abs() < 1e-3);
        assert!((trail.opacity() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn retraction_stops_growing_and_shortens_curve() {
        let cfg = config();
        let mut trail = Trail::new(Vec3::ZERO, 0.0, &cfg);
        trail.update(Vec3::new(0.0, 8.0, 0.0), 0.8, 0.05, &cfg);
        let full = polyline_length(trail.curve());

        trail.update(Vec3::new(0.0, 100.0, 0.0), 0.25, 0.10, &cfg);
        assert_eq!(trail.len(), 2, "no points appended while retracting");
        assert!((trail.curve_fraction() - 0.5).abs() < 1e-6);
        assert!((polyline_length(trail.curve()) - full * 0.5).abs() < 1e-3);
        assert_eq!(trail.anchor(), Vec3::new(0.0, -8.0, 0.0));
        assert!((trail.opacity() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn single_point_curve_is_noop() {
        let cfg = config();
        let mut trail = Trail::new(Vec3::ZERO, 0.0, &cfg);
        // Retracting from the start: nothing appended, curve stays empty
        assert!(trail.update(Vec3::new(1.0, 1.0, 0.0), 0.1, 0.05, &cfg));
        assert!(trail.curve().is_empty());
        assert_eq!(trail.anchor(), Vec3::ZERO);
    }
}
