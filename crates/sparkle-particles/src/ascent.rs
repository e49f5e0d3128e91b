//! Short-lived sparks left behind a climbing rocket.
//!
//! Every ascent step drops fresh sparks at the rocket's position. Each spark
//! lives for half a second and fades linearly; the effect decides its color,
//! size and any extra motion.

use crate::rand::ParticleRng;
use serde::{Deserialize, Serialize};
use sparkle_core::{Color, Vec3};
use std::f32::consts::TAU;
use std::fmt;

/// Seconds a spark stays visible
pub const SPARK_LIFETIME: f64 = 0.5;
/// Opacity of a freshly emitted spark
pub const SPARK_OPACITY: f32 = 0.8;

const SPARK_SCALE: f32 = 0.2;
const SPARKLE_GROUP_SIZE: usize = 5;
const SPARKLE_SPREAD: f32 = 0.3;
const SPARKLE_FLICKER_SPEED: f64 = 8.0;
/// Sparkle groups change ten times per second
const SPARKLE_GROUPS_PER_SECOND: f64 = 10.0;
const RAINBOW_HUE_STEP: f64 = 0.1;
const COMET_SCALE: f32 = 0.3;
const COMET_GROWTH: f32 = 1.1;
const COMET_RISE: f32 = 2.0;
const COMET_COLOR: u32 = 0xffaa00;

/// How a rocket marks its path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrailEffect {
    /// One white spark per step
    #[default]
    Fade,
    /// Flickering groups of five scattered sparks
    Sparkle,
    /// Sparks cycling through the hue wheel
    Rainbow,
    /// Orange sparks that swell, then shrink while drifting upward
    Comet,
}

impl TrailEffect {
    pub const ALL: [TrailEffect; 4] = [
        TrailEffect::Fade,
        TrailEffect::Sparkle,
        TrailEffect::Rainbow,
        TrailEffect::Comet,
    ];

    /// Resolve an effect name. Unknown names fall back to `Fade`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fade" => TrailEffect::Fade,
            "sparkle" => TrailEffect::Sparkle,
            "rainbow" => TrailEffect::Rainbow,
            "comet" => TrailEffect::Comet,
            other => {
                log::warn!("unknown trail effect '{other}', using fade");
                TrailEffect::Fade
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrailEffect::Fade => "fade",
            TrailEffect::Sparkle => "sparkle",
            TrailEffect::Rainbow => "rainbow",
            TrailEffect::Comet => "comet",
        }
    }
}

impl fmt::Display for TrailEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for TrailEffect {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<TrailEffect> for String {
    fn from(effect: TrailEffect) -> Self {
        effect.name().to_string()
    }
}

/// One ascent spark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub position: Vec3,
    pub color: Color,
    pub scale: f32,
    pub opacity: f32,
    /// Scale at emission
    pub base_scale: f32,
    /// Simulation time of emission
    pub born: f64,
    /// Sparkle group sharing one flicker phase
    pub group: Option<u64>,
}

impl Spark {
    fn new(position: Vec3, color: Color, scale: f32, born: f64) -> Self {
        Self {
            position,
            color,
            scale,
            opacity: SPARK_OPACITY,
            base_scale: scale,
            born,
            group: None,
        }
    }

    /// Fraction of the spark's life used up at `now`
    pub fn age(&self, now: f64) -> f32 {
        ((now - self.born) / SPARK_LIFETIME) as f32
    }
}

/// The sparks behind one rocket
#[derive(Debug, Clone, Default)]
pub struct AscentTrail {
    effect: TrailEffect,
    sparks: Vec<Spark>,
}

impl AscentTrail {
    pub fn new(effect: TrailEffect) -> Self {
        Self {
            effect,
            sparks: Vec::new(),
        }
    }

    pub fn effect(&self) -> TrailEffect {
        self.effect
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }

    /// Drop this step's sparks at `position`
    pub fn emit(&mut self, position: Vec3, now: f64, rng: &mut ParticleRng) {
        match self.effect {
            TrailEffect::Fade => {
                self.sparks
                    .push(Spark::new(position, Color::WHITE, SPARK_SCALE, now));
            }
            TrailEffect::Sparkle => {
                let group = (now * SPARKLE_GROUPS_PER_SECOND).floor() as u64;
                for i in 0..SPARKLE_GROUP_SIZE {
                    let angle = TAU * i as f32 / SPARKLE_GROUP_SIZE as f32;
                    let offset = Vec3::new(
                        angle.cos() * SPARKLE_SPREAD * rng.unit(),
                        angle.sin() * SPARKLE_SPREAD * rng.unit(),
                        0.0,
                    );
                    let scale = SPARK_SCALE + rng.unit() * SPARK_SCALE;
                    let mut spark = Spark::new(position + offset, Color::WHITE, scale, now);
                    spark.group = Some(group);
                    self.sparks.push(spark);
                }
            }
            TrailEffect::Rainbow => {
                let hue = now.rem_euclid(1.0) as f32;
                self.sparks.push(Spark::new(
                    position,
                    Color::from_hsl(hue, 1.0, 0.5),
                    SPARK_SCALE,
                    now,
                ));
            }
            TrailEffect::Comet => {
                self.sparks.push(Spark::new(
                    position,
                    Color::from_hex(COMET_COLOR),
                    COMET_SCALE,
                    now,
                ));
            }
        }
    }

    /// Drop sparks older than their lifetime and animate the rest
    pub fn update(&mut self, dt: f32, now: f64) {
        self.sparks.retain(|s| s.age(now) < 1.0);

        for (index, spark) in self.sparks.iter_mut().enumerate() {
            let age = spark.age(now).max(0.0);
            let fade = 1.0 - age;
            spark.opacity = SPARK_OPACITY * fade;

            match self.effect {
                TrailEffect::Fade => {}
                TrailEffect::Sparkle => {
                    if let Some(group) = spark.group {
                        let phase = now * SPARKLE_FLICKER_SPEED + group as f64;
                        let brightness = 0.3 + (phase.sin() as f32 * 0.5 + 0.5) * 0.7;
                        spark.opacity *= brightness;
                    }
                    spark.scale = spark.base_scale * (1.0 - age * 0.5);
                }
                TrailEffect::Rainbow => {
                    let hue = (now + index as f64 * RAINBOW_HUE_STEP).rem_euclid(1.0);
                    spark.color = Color::from_hsl(hue as f32, 1.0, 0.5);
                }
                TrailEffect::Comet => {
                    spark.scale =
                        (spark.scale * COMET_GROWTH * fade).max(spark.base_scale * 1e-4);
                    spark.position.y += dt * COMET_RISE;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_after(effect: TrailEffect, steps: usize, dt: f32) -> AscentTrail {
        let mut rng = ParticleRng::new(3);
        let mut trail = AscentTrail::new(effect);
        let mut now = 0.0;
        for step in 0..steps {
            now += f64::from(dt);
            trail.emit(Vec3::new(0.0, step as f32, 0.0), now, &mut rng);
            trail.update(dt, now);
        }
        trail
    }

    #[test]
    fn effect_names_round_trip() {
        for effect in TrailEffect::ALL {
            assert_eq!(TrailEffect::from_name(effect.name()), effect);
        }
        assert_eq!(TrailEffect::from_name("glitter"), TrailEffect::Fade);
        assert_eq!(TrailEffect::default(), TrailEffect::Fade);
    }

    #[test]
    fn sparks_live_for_half_a_second() {
        // 0.05 s steps: ten steps fill exactly one lifetime
        let trail = trail_after(TrailEffect::Fade, 40, 0.05);
        assert_eq!(trail.len(), 10);

        let mut trail = trail_after(TrailEffect::Fade, 1, 0.05);
        trail.update(0.55, 0.6);
        assert!(trail.is_empty());
    }

    #[test]
    fn fade_sparks_dim_linearly() {
        let mut rng = ParticleRng::new(1);
        let mut trail = AscentTrail::new(TrailEffect::Fade);
        trail.emit(Vec3::new(1.0, 2.0, 0.0), 0.0, &mut rng);
        trail.update(0.0, 0.0);
        let spark = trail.sparks()[0];
        assert_eq!(spark.opacity, SPARK_OPACITY);
        assert_eq!(spark.color, Color::WHITE);
        assert_eq!(spark.scale, 0.2);

        trail.update(0.25, 0.25);
        let spark = trail.sparks()[0];
        assert!((spark.opacity - 0.4).abs() < 1e-6);
        assert_eq!(spark.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(spark.scale, 0.2);
    }

    #[test]
    fn sparkle_emits_flickering_groups() {
        let mut rng = ParticleRng::new(9);
        let mut trail = AscentTrail::new(TrailEffect::Sparkle);
        let origin = Vec3::new(5.0, 5.0, 0.0);
        trail.emit(origin, 1.23, &mut rng);
        assert_eq!(trail.len(), SPARKLE_GROUP_SIZE);
        for spark in trail.sparks() {
            assert_eq!(spark.group, Some(12));
            assert!((spark.position - origin).length() <= SPARKLE_SPREAD * 1.5);
            assert!((0.2..=0.4).contains(&spark.scale));
        }

        trail.update(0.1, 1.33);
        for spark in trail.sparks() {
            let fade = SPARK_OPACITY * (1.0 - spark.age(1.33));
            // Brightness stays within [0.3, 1]
            assert!(spark.opacity <= fade + 1e-6);
            assert!(spark.opacity >= fade * 0.3 - 1e-6);
            assert!((spark.scale - spark.base_scale * 0.9).abs() < 1e-5);
        }
        // One group, one shared brightness
        let first = trail.sparks()[0].opacity;
        assert!(trail.sparks().iter().all(|s| s.opacity == first));
    }

    #[test]
    fn rainbow_cycles_hue() {
        let mut rng = ParticleRng::new(1);
        let mut trail = AscentTrail::new(TrailEffect::Rainbow);
        trail.emit(Vec3::ZERO, 0.0, &mut rng);
        assert_eq!(trail.sparks()[0].color, Color::from_hsl(0.0, 1.0, 0.5));

        trail.emit(Vec3::ZERO, 0.1, &mut rng);
        trail.update(0.1, 0.1);
        let colors: Vec<Color> = trail.sparks().iter().map(|s| s.color).collect();
        assert_eq!(colors[0], Color::from_hsl(0.1, 1.0, 0.5));
        assert_eq!(colors[1], Color::from_hsl(0.2, 1.0, 0.5));
        assert_ne!(colors[0], colors[1]);
        assert!(trail.sparks().iter().all(|s| s.scale == 0.2));
    }

    #[test]
    fn comet_sparks_drift_up_and_shrink() {
        let mut rng = ParticleRng::new(1);
        let mut trail = AscentTrail::new(TrailEffect::Comet);
        trail.emit(Vec3::ZERO, 0.0, &mut rng);
        let spark = trail.sparks()[0];
        assert_eq!(spark.color, Color::from_hex(0xffaa00));
        assert_eq!(spark.scale, 0.3);

        // Fresh spark swells
        trail.update(0.0, 0.0);
        assert!(trail.sparks()[0].scale > 0.3);

        let mut now = 0.0;
        for _ in 0..9 {
            now += 0.05;
            trail.update(0.05, now);
        }
        let spark = trail.sparks()[0];
        assert!((spark.position.y - 0.9).abs() < 1e-4);
        assert!(spark.scale < 0.3);
        assert!(spark.scale >= 0.3 * 1e-4);
        assert!((spark.opacity - 0.08).abs() < 1e-4);
    }

    #[test]
    fn clear_drops_every_spark() {
        let mut trail = trail_after(TrailEffect::Sparkle, 3, 0.02);
        assert_eq!(trail.len(), 15);
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.effect(), TrailEffect::Sparkle);
    }
}
