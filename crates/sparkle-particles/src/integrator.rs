//! Per-particle kinematics.
//!
//! Step order is fixed: acceleration, gravity, friction, position, fade.
//! Friction after all force accumulation and before the position update is
//! what gives bursts their decelerating arcs.

use crate::curves::fade_alpha;
use crate::particle::Particle;

/// Advance one surviving particle by `dt` seconds.
///
/// Expects `remaining` to have already been decremented for this frame.
pub fn integrate(p: &mut Particle, dt: f32) {
    p.velocity += p.acceleration * dt;
    p.velocity.y -= p.gravity * dt;
    if p.friction > 0.0 {
        p.velocity *= friction_decay(p.friction, dt);
    }
    p.position += p.velocity * dt;
    p.alpha = fade_alpha(p.remaining / p.lifetime);
}

/// Exponential drag factor: the same coefficient removes the same fraction
/// of velocity per second at any frame rate.
pub fn friction_decay(coefficient: f32, dt: f32) -> f32 {
    (1.0 - coefficient).powf(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::Vec3;

    fn particle(velocity: Vec3) -> Particle {
        Particle {
            velocity,
            remaining: 1.0,
            lifetime: 1.0,
            ..Particle::dead()
        }
    }

    #[test]
    fn zero_friction_leaves_velocity_to_forces() {
        for dt in [0.001f32, 0.016, 0.1, 0.7] {
            let mut p = particle(Vec3::new(3.0, 4.0, -2.0));
            p.gravity = 2.0;
            p.acceleration = Vec3::new(1.0, 0.0, 0.5);
            integrate(&mut p, dt);
            let expected = Vec3::new(3.0 + dt, 4.0 - 2.0 * dt, -2.0 + 0.5 * dt);
            assert_eq!(p.velocity, expected);
        }
    }

    #[test]
    fn order_is_force_then_friction_then_position() {
        let mut p = particle(Vec3::new(10.0, 0.0, 0.0));
        p.gravity = 10.0;
        p.friction = 0.5;
        integrate(&mut p, 1.0);
        // v = (10, -10) * 0.5 = (5, -5); x = v * 1
        assert!((p.velocity.x - 5.0).abs() < 1e-5);
        assert!((p.velocity.y + 5.0).abs() < 1e-5);
        assert!((p.position.x - 5.0).abs() < 1e-5);
        assert!((p.position.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn friction_is_frame_rate_independent() {
        let mut coarse = particle(Vec3::new(8.0, 0.0, 0.0));
        let mut fine = particle(Vec3::new(8.0, 0.0, 0.0));
        coarse.friction = 0.3;
        fine.friction = 0.3;

        integrate(&mut coarse, 0.5);
        integrate(&mut fine, 0.25);
        integrate(&mut fine, 0.25);
        assert!((coarse.velocity.x - fine.velocity.x).abs() < 1e-4);
    }

    #[test]
    fn alpha_is_cubic_in_remaining_life() {
        let mut p = particle(Vec3::ZERO);
        p.lifetime = 2.0;
        p.remaining = 1.0;
        integrate(&mut p, 0.1);
        assert_eq!(p.alpha, 0.125);
    }

    #[test]
    fn acceleration_accumulates() {
        let mut p = particle(Vec3::ZERO);
        p.acceleration = Vec3::new(0.0, 0.0, 4.0);
        integrate(&mut p, 0.5);
        integrate(&mut p, 0.5);
        assert!((p.velocity.z - 4.0).abs() < 1e-6);
        // 0.5 * 2 + 0.5 * 4
        assert!((p.position.z - 3.0).abs() < 1e-6);
    }
}
