//! Explosion pattern generators.
//!
//! Every generator is a pure function of the burst parameters and an RNG.
//! It returns one [`Emission`] per requested particle; the caller feeds them
//! into the pools and silently drops whatever the pools reject.

use crate::rand::ParticleRng;
use serde::{Deserialize, Serialize};
use sparkle_core::{Color, Vec3};
use std::f32::consts::{PI, TAU};
use std::fmt;

/// Named explosion pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pattern {
    Spherical,
    Ring,
    Burst,
    Palm,
    Willow,
    Heart,
    BrokenHeart,
    Helix,
    Star,
    /// Scatter motion under its own, lighter gravity
    ChristmasTree,
    /// Fallback for unrecognized names: random directions at constant speed
    #[default]
    Scatter,
}

impl Pattern {
    pub const ALL: [Pattern; 11] = [
        Pattern::Spherical,
        Pattern::Ring,
        Pattern::Burst,
        Pattern::Palm,
        Pattern::Willow,
        Pattern::Heart,
        Pattern::BrokenHeart,
        Pattern::Helix,
        Pattern::Star,
        Pattern::ChristmasTree,
        Pattern::Scatter,
    ];

    /// Resolve a pattern name. Unknown names fall back to `Scatter`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "spherical" => Pattern::Spherical,
            "ring" => Pattern::Ring,
            "burst" => Pattern::Burst,
            "palm" => Pattern::Palm,
            "willow" => Pattern::Willow,
            "heart" => Pattern::Heart,
            "brokenHeart" | "broken_heart" => Pattern::BrokenHeart,
            "helix" => Pattern::Helix,
            "star" => Pattern::Star,
            "christmasTree" | "christmas_tree" => Pattern::ChristmasTree,
            "scatter" => Pattern::Scatter,
            other => {
                log::warn!("unknown explosion pattern '{other}', using scatter");
                Pattern::Scatter
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Spherical => "spherical",
            Pattern::Ring => "ring",
            Pattern::Burst => "burst",
            Pattern::Palm => "palm",
            Pattern::Willow => "willow",
            Pattern::Heart => "heart",
            Pattern::BrokenHeart => "brokenHeart",
            Pattern::Helix => "helix",
            Pattern::Star => "star",
            Pattern::ChristmasTree => "christmasTree",
            Pattern::Scatter => "scatter",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Pattern {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.name().to_string()
    }
}

/// Inputs shared by all generators
#[derive(Debug, Clone, Copy)]
pub struct BurstParams {
    pub particle_count: usize,
    pub speed: f32,
    pub spread: f32,
    pub color: Color,
    pub secondary_color: Color,
}

/// Initial state for one generated particle, relative to the burst origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    /// Offset from the burst origin baked into the spawn position
    pub offset: Vec3,
    pub velocity: Vec3,
    /// Continuous acceleration stored on the particle
    pub acceleration: Vec3,
    /// Multiplier on the pattern's base gravity
    pub gravity_multiplier: f32,
    pub color: Color,
}

impl Emission {
    fn planar(angle: f32, magnitude: f32, gravity_multiplier: f32, color: Color) -> Self {
        Self {
            offset: Vec3::ZERO,
            velocity: Vec3::new(angle.cos() * magnitude, angle.sin() * magnitude, 0.0),
            acceleration: Vec3::ZERO,
            gravity_multiplier,
            color,
        }
    }
}

const PALM_BRANCHES: usize = 8;
const WILLOW_EMISSION_ANGLE: f32 = 0.5;
const WILLOW_DRIFT: f32 = 10.0;
const HEART_SPEED_FACTOR: f32 = 0.05;
const BROKEN_HEART_PIVOT_DEPTH: f32 = 30.0;
const BROKEN_HEART_TEAR_RATE: f32 = 0.05;
const BROKEN_HEART_GRAVITY: f32 = 1.3;
const HELIX_RADIUS: f32 = 0.5;
const HELIX_TANGENTIAL_SPEED: f32 = 2.0;
const HELIX_VERTICAL_SPACING: f32 = 0.1;
const HELIX_JITTER: f32 = 0.1;
const HELIX_GRAVITY: f32 = 0.2;
const STAR_SPIKES: usize = 5;

/// Generate the emissions for one burst
pub fn generate(pattern: Pattern, params: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    match pattern {
        Pattern::Spherical => spherical(params, rng),
        Pattern::Ring => ring(params, rng),
        Pattern::Burst => burst(params, rng),
        Pattern::Palm => palm(params, rng),
        Pattern::Willow => willow(params, rng),
        Pattern::Heart => heart(params, rng),
        Pattern::BrokenHeart => broken_heart(params),
        Pattern::Helix => helix(params, rng),
        Pattern::Star => star(params, rng),
        Pattern::ChristmasTree | Pattern::Scatter => scatter(params, rng),
    }
}

fn even_angle(i: usize, n: usize) -> f32 {
    i as f32 / n as f32 * TAU
}

fn spherical(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let n = p.particle_count;
    (0..n)
        .map(|i| {
            let magnitude = p.speed * rng.range(0.8, 1.2) * p.spread;
            let gravity = rng.range(0.8, 1.2);
            Emission::planar(even_angle(i, n), magnitude, gravity, p.color)
        })
        .collect()
}

fn ring(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let n = p.particle_count;
    let magnitude = p.speed * p.spread;
    (0..n)
        .map(|i| Emission::planar(even_angle(i, n), magnitude, rng.range(0.9, 1.0), p.color))
        .collect()
}

fn burst(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    (0..p.particle_count)
        .map(|_| {
            let angle = rng.angle();
            let magnitude = p.speed * rng.unit() * p.spread;
            Emission::planar(angle, magnitude, 1.0, p.color)
        })
        .collect()
}

fn palm(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let per_branch = (p.particle_count / PALM_BRANCHES).max(1) as f32;
    (0..p.particle_count)
        .map(|i| {
            let branch = i % PALM_BRANCHES;
            let position_in_branch = (i / PALM_BRANCHES) as f32 / per_branch;
            let base_angle = even_angle(branch, PALM_BRANCHES);
            let angle = base_angle + rng.centered(0.3 * position_in_branch);
            let magnitude = p.speed * (1.0 + position_in_branch) * p.spread;
            Emission::planar(angle, magnitude, 1.0, p.color)
        })
        .collect()
}

fn willow(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    (0..p.particle_count)
        .map(|_| {
            let angle_offset = (rng.unit() * 1.2 - 0.5) * WILLOW_EMISSION_ANGLE;
            let angle = -PI / 2.0 + angle_offset;
            let drift = rng.centered(WILLOW_DRIFT);
            let initial_speed = p.speed * rng.range(0.7, 1.0) * p.spread;
            let mut emission = Emission::planar(angle, initial_speed, 1.0, p.color);
            emission.velocity.x += drift;
            emission
        })
        .collect()
}

/// Point on the parametric heart curve, scaled by `scale`
fn heart_point(t: f32, scale: f32) -> Vec3 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec3::new(x * scale, y * scale, 0.0)
}

fn heart_velocity(point: Vec3, speed: f32) -> Vec3 {
    let angle = point.y.atan2(point.x);
    let magnitude = speed * point.length() * HEART_SPEED_FACTOR;
    Vec3::new(angle.cos() * magnitude, angle.sin() * magnitude, 0.0)
}

fn heart(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let n = p.particle_count;
    (0..n)
        .map(|i| {
            let point = heart_point(even_angle(i, n), p.spread);
            Emission {
                offset: Vec3::ZERO,
                velocity: heart_velocity(point, p.speed),
                acceleration: Vec3::ZERO,
                gravity_multiplier: rng.range(0.9, 1.0),
                color: p.color,
            }
        })
        .collect()
}

/// Heart whose halves tear apart: each sample carries a constant sideways
/// acceleration derived once from its position relative to a pivot below the
/// heart's tip, with opposite signs for the two halves.
fn broken_heart(p: &BurstParams) -> Vec<Emission> {
    let n = p.particle_count;
    let pivot = Vec3::new(0.0, -p.spread * BROKEN_HEART_PIVOT_DEPTH, 0.0);
    let half = n as f32 / 2.0;
    (0..n)
        .map(|i| {
            let point = heart_point(even_angle(i, n), p.spread);
            let sign = if (i as f32) < half { 1.0 } else { -1.0 };
            let tear = (point - pivot).cross(&Vec3::Z) * (BROKEN_HEART_TEAR_RATE * sign);
            Emission {
                offset: Vec3::ZERO,
                velocity: heart_velocity(point, p.speed),
                acceleration: tear,
                gravity_multiplier: BROKEN_HEART_GRAVITY,
                color: p.color,
            }
        })
        .collect()
}

/// Two interleaved streams half a turn apart. Radius narrows and the
/// vertical offset deepens with each step; both are baked into the spawn
/// offset rather than simulated.
fn helix(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let per_stream = p.particle_count.div_ceil(2).max(1) as f32;
    let rise_speed = p.speed * 0.1 * p.spread;
    (0..p.particle_count)
        .map(|i| {
            let stream = i % 2;
            let step = (i / 2) as f32;
            let progress = step / per_stream;
            let angle = progress * TAU + stream as f32 * PI;
            let jitter = 1.0 + rng.centered(HELIX_JITTER);
            let radius = HELIX_RADIUS * (1.0 - 0.5 * progress) * jitter;

            Emission {
                offset: Vec3::new(
                    angle.cos() * radius,
                    -step * HELIX_VERTICAL_SPACING,
                    angle.sin() * radius,
                ),
                velocity: Vec3::new(
                    -angle.sin() * HELIX_TANGENTIAL_SPEED,
                    rise_speed * jitter,
                    angle.cos() * HELIX_TANGENTIAL_SPEED,
                ),
                acceleration: Vec3::ZERO,
                gravity_multiplier: HELIX_GRAVITY,
                color: if stream == 1 { p.secondary_color } else { p.color },
            }
        })
        .collect()
}

/// Five-pointed star outline, repeated. Only copies after the first get
/// radius and angle jitter so the leading outline stays crisp.
fn star(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let points_per_star = STAR_SPIKES * 2;
    let outer = p.speed * p.spread;
    let inner = p.speed * 0.5 * p.spread;
    (0..p.particle_count)
        .map(|i| {
            let star_point = i % points_per_star;
            let is_copy = i / points_per_star > 0;
            let is_outer = star_point % 2 == 0;

            let mut radius = if is_outer { outer } else { inner };
            if i > points_per_star && is_outer {
                radius = outer * (1.0 + rng.range(-0.1, 0.1));
            }

            let (radius_variation, angle_variation) = if is_copy {
                (1.0 + rng.range(-0.1, 0.1), rng.range(-0.05, 0.05))
            } else {
                (1.0, 0.0)
            };

            let angle = even_angle(star_point, points_per_star) + angle_variation;
            Emission::planar(angle, radius * radius_variation, 1.0, p.color)
        })
        .collect()
}

fn scatter(p: &BurstParams, rng: &mut ParticleRng) -> Vec<Emission> {
    let magnitude = p.speed * p.spread;
    (0..p.particle_count)
        .map(|_| Emission::planar(rng.angle(), magnitude, 1.0, p.color))
        .collect()
}
