//! Particle records, spawn requests, GPU instance data, and the per-category pool

use crate::ascent::Spark;
use crate::category::Category;
use crate::config::TrailConfig;
use crate::curves::normalized_age;
use crate::integrator;
use crate::trail::Trail;
use bytemuck::{Pod, Zeroable};
use sparkle_core::{Color, Quat, Vec3};

/// Remaining life, as a fraction of the initial lifetime, at or below which
/// a particle counts as expired. Absorbs the rounding left over after
/// stepping a lifetime down in equal f32 slices.
const EXPIRY_TOLERANCE: f32 = 1e-4;

/// One simulated particle. The optional trail lives inside the record so
/// compaction moves both together.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub color: Color,
    pub scale: f32,
    /// Seconds left to live
    pub remaining: f32,
    /// Seconds the particle was spawned with
    pub lifetime: f32,
    /// Downward pull along -Y
    pub gravity: f32,
    /// Fraction of velocity removed per second, in [0, 1]
    pub friction: f32,
    pub alpha: f32,
    pub orientation: Quat,
    pub trail: Option<Box<Trail>>,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            color: Color::BLACK,
            scale: 0.0,
            remaining: 0.0,
            lifetime: 0.0,
            gravity: 0.0,
            friction: 0.0,
            alpha: 0.0,
            orientation: Quat::IDENTITY,
            trail: None,
        }
    }

    /// Remaining lifetime over initial lifetime, in [0, 1]
    pub fn normalized_age(&self) -> f32 {
        normalized_age(self.remaining, self.lifetime)
    }

    pub fn has_trail(&self) -> bool {
        self.trail.is_some()
    }
}

/// Orientation that points a particle's +Y axis against its direction of travel
pub fn orientation_for(velocity: Vec3) -> Quat {
    Quat::from_unit_vectors(Vec3::UP, -velocity.normalized())
}

/// Everything needed to emit one particle
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpawn {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub scale: f32,
    pub lifetime: f32,
    pub gravity: f32,
    pub category: Category,
    pub acceleration: Vec3,
    pub friction: f32,
    pub trail: bool,
}

impl Default for ParticleSpawn {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Color::WHITE,
            scale: 1.0,
            lifetime: 1.0,
            gravity: 0.0,
            category: Category::Sphere,
            acceleration: Vec3::ZERO,
            friction: 0.0,
            trail: false,
        }
    }
}

impl ParticleSpawn {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_trail(mut self, trail: bool) -> Self {
        self.trail = trail;
        self
    }

    /// Whether the numeric fields can produce a live, well-defined particle
    pub fn is_valid(&self) -> bool {
        self.lifetime.is_finite()
            && self.lifetime > 0.0
            && self.scale.is_finite()
            && self.gravity.is_finite()
            && self.friction.is_finite()
            && self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
    }
}

/// GPU instance data for one live particle.
/// 48 bytes, 16-byte aligned (3 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xyz = position, w = uniform scale
    pub pos_scale: [f32; 4],
    /// rgb premultiplied by alpha, a = alpha
    pub color: [f32; 4],
    /// Orientation quaternion (x, y, z, w)
    pub orientation: [f32; 4],
}

impl ParticleInstance {
    pub fn new(position: Vec3, scale: f32, color: Color, alpha: f32, orientation: Quat) -> Self {
        let c = color.scaled(alpha);
        Self {
            pos_scale: [position.x, position.y, position.z, scale],
            color: [c.r, c.g, c.b, alpha],
            orientation: orientation.to_array(),
        }
    }

    pub fn from_particle(p: &Particle) -> Self {
        Self::new(p.position, p.scale, p.color, p.alpha, p.orientation)
    }

    /// Ascent sparks are unrotated
    pub fn from_spark(s: &Spark) -> Self {
        Self::new(s.position, s.scale, s.color, s.opacity, Quat::IDENTITY)
    }
}

/// What one pool update did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStep {
    pub expired: usize,
    pub trails_released: usize,
}

/// Fixed-capacity dense pool for one category.
///
/// Slots `[0, active_count)` are live; slots past it are stale and never
/// exposed. Dead particles are removed by a stable in-place compaction.
pub struct ParticlePool {
    category: Category,
    particles: Vec<Particle>,
    active_count: usize,
}

impl ParticlePool {
    pub fn new(category: Category, capacity: usize) -> Self {
        let mut particles = Vec::with_capacity(capacity);
        particles.resize_with(capacity, Particle::dead);
        Self {
            category,
            particles,
            active_count: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_full(&self) -> bool {
        self.active_count >= self.particles.len()
    }

    /// Copy a spawn request into the next free slot.
    /// Returns the slot index, or `None` if the pool is full.
    pub fn add(&mut self, spawn: &ParticleSpawn, trail: Option<Trail>) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = self.active_count;
        let p = &mut self.particles[index];
        p.position = spawn.position;
        p.velocity = spawn.velocity;
        p.acceleration = spawn.acceleration;
        p.color = spawn.color;
        p.scale = spawn.scale;
        p.remaining = spawn.lifetime;
        p.lifetime = spawn.lifetime;
        p.gravity = spawn.gravity;
        p.friction = spawn.friction.clamp(0.0, 1.0);
        p.alpha = 1.0;
        p.orientation = orientation_for(spawn.velocity);
        p.trail = trail.map(Box::new);
        self.active_count += 1;
        Some(index)
    }

    /// Age, compact, and integrate every live particle.
    ///
    /// Survivors are moved down to the write cursor before integration, so
    /// relative order is preserved and `[0, active_count)` has no gaps. A
    /// dying particle's trail is dropped in the same pass.
    pub fn update(&mut self, dt: f32, now: f64, trail_config: &TrailConfig) -> PoolStep {
        let mut step = PoolStep::default();
        let mut cursor = 0;

        for i in 0..self.active_count {
            let p = &mut self.particles[i];
            p.remaining -= dt;

            if p.remaining <= p.lifetime * EXPIRY_TOLERANCE {
                if p.trail.take().is_some() {
                    step.trails_released += 1;
                }
                step.expired += 1;
                continue;
            }

            if i != cursor {
                // Slot `cursor` holds a dead record whose trail is already gone
                self.particles.swap(cursor, i);
            }

            let p = &mut self.particles[cursor];
            integrator::integrate(p, dt);
            if let Some(trail) = p.trail.as_mut() {
                let age = normalized_age(p.remaining, p.lifetime);
                trail.update(p.position, age, now, trail_config);
            }
            cursor += 1;
        }

        self.active_count = cursor;
        step
    }

    /// Drop every live particle. Returns the number of trails released.
    pub fn clear(&mut self) -> usize {
        let released = self.particles[..self.active_count]
            .iter_mut()
            .filter_map(|p| p.trail.take())
            .count();
        self.active_count = 0;
        released
    }

    /// Free the backing storage. The pool rejects all further emission.
    pub fn release_storage(&mut self) -> usize {
        let released = self.clear();
        self.particles = Vec::new();
        released
    }

    /// Live particles (first `active_count` slots)
    pub fn live(&self) -> &[Particle] {
        &self.particles[..self.active_count]
    }

    pub fn get(&self, slot: usize) -> Option<&Particle> {
        self.live().get(slot)
    }

    /// Live particles that carry a trail
    pub fn trail_count(&self) -> usize {
        self.live().iter().filter(|p| p.has_trail()).count()
    }
}
