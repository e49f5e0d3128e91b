//! Turns a firework component into concrete spawn requests.

use crate::config::SimulationConfig;
use crate::particle::ParticleSpawn;
use crate::pattern::{self, BurstParams};
use crate::rand::ParticleRng;
use crate::recipe::FireworkComponent;
use sparkle_core::Vec3;

/// Derive the burst parameters for a component under a configuration
pub fn burst_params(component: &FireworkComponent, config: &SimulationConfig) -> BurstParams {
    let count = (config.particle_density * component.size).floor();
    BurstParams {
        particle_count: if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        },
        speed: config.base_speed * component.size,
        spread: component.spread,
        color: component.color,
        secondary_color: component.secondary_color,
    }
}

/// Build every spawn request for one explosion of `component` at `origin`
pub fn burst_spawns(
    origin: Vec3,
    component: &FireworkComponent,
    config: &SimulationConfig,
    rng: &mut ParticleRng,
) -> Vec<ParticleSpawn> {
    let params = burst_params(component, config);
    let base_gravity = config.pattern_gravities.for_pattern(component.pattern);
    let scale = config.particle_size * component.size;

    pattern::generate(component.pattern, &params, rng)
        .into_iter()
        .map(|e| ParticleSpawn {
            position: origin + e.offset,
            velocity: e.velocity,
            color: e.color,
            scale,
            lifetime: component.lifetime,
            gravity: base_gravity * e.gravity_multiplier,
            category: component.shape,
            acceleration: e.acceleration,
            friction: component.friction,
            trail: component.trail,
        })
        .collect()
}
