//! Rockets: a launched recipe climbing toward its explosion height.

use crate::ascent::{AscentTrail, TrailEffect};
use crate::rand::ParticleRng;
use crate::recipe::FireworkComponent;
use sparkle_core::Vec3;

/// An in-flight rocket
#[derive(Debug, Clone)]
pub struct Rocket {
    position: Vec3,
    target_y: f32,
    components: Vec<FireworkComponent>,
    trail: AscentTrail,
}

impl Rocket {
    pub fn new(
        x: f32,
        y: f32,
        target_y: f32,
        components: Vec<FireworkComponent>,
        effect: TrailEffect,
    ) -> Self {
        Self {
            position: Vec3::new(x, y, 0.0),
            target_y,
            components,
            trail: AscentTrail::new(effect),
        }
    }

    /// Climb for `dt` seconds, leaving sparks behind. Returns `true` once
    /// the rocket has reached its explosion height; its sparks are gone by
    /// then.
    pub fn ascend(&mut self, dt: f32, speed: f32, now: f64, rng: &mut ParticleRng) -> bool {
        self.position.y += speed * dt;
        self.trail.emit(self.position, now, rng);
        self.trail.update(dt, now);
        if self.position.y >= self.target_y {
            self.trail.clear();
            return true;
        }
        false
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target_y(&self) -> f32 {
        self.target_y
    }

    pub fn components(&self) -> &[FireworkComponent] {
        &self.components
    }

    pub fn trail(&self) -> &AscentTrail {
        &self.trail
    }

    /// Consume the rocket, yielding its explosion point and payload
    pub fn into_payload(self) -> (Vec3, Vec<FireworkComponent>) {
        (self.position, self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climbs_until_target() {
        let mut rng = ParticleRng::new(1);
        let mut rocket = Rocket::new(
            2.0,
            -20.0,
            0.0,
            vec![FireworkComponent::default()],
            TrailEffect::Fade,
        );
        assert!(!rocket.ascend(0.25, 40.0, 0.25, &mut rng));
        assert_eq!(rocket.position(), Vec3::new(2.0, -10.0, 0.0));
        assert!(rocket.ascend(0.25, 40.0, 0.5, &mut rng));
        assert_eq!(rocket.position().y, 0.0);
    }

    #[test]
    fn launch_above_target_explodes_immediately() {
        let mut rng = ParticleRng::new(1);
        let mut rocket = Rocket::new(0.0, 50.0, 10.0, Vec::new(), TrailEffect::Comet);
        assert!(rocket.ascend(0.0, 40.0, 0.0, &mut rng));
        assert!(rocket.trail().is_empty());
    }

    #[test]
    fn sparks_follow_the_climb() {
        let mut rng = ParticleRng::new(1);
        let mut rocket = Rocket::new(0.0, 0.0, 100.0, Vec::new(), TrailEffect::Fade);
        let mut now = 0.0;
        for _ in 0..4 {
            now += 0.125;
            assert!(!rocket.ascend(0.125, 8.0, now, &mut rng));
        }
        let sparks = rocket.trail().sparks();
        assert_eq!(sparks.len(), 4);
        assert_eq!(sparks[0].position.y, 1.0);
        assert_eq!(sparks[3].position, rocket.position());
        // Oldest spark is most faded
        assert!(sparks[0].opacity < sparks[3].opacity);

        // Sparks emitted half a second ago or earlier are gone
        for _ in 0..4 {
            now += 0.125;
            rocket.ascend(0.125, 8.0, now, &mut rng);
        }
        assert_eq!(rocket.trail().len(), 4);
        assert_eq!(rocket.trail().sparks()[0].position.y, 5.0);
    }

    #[test]
    fn explosion_clears_the_trail() {
        let mut rng = ParticleRng::new(4);
        let mut rocket = Rocket::new(0.0, 0.0, 1.5, Vec::new(), TrailEffect::Sparkle);
        assert!(!rocket.ascend(0.1, 10.0, 0.1, &mut rng));
        assert_eq!(rocket.trail().len(), 5);
        assert!(rocket.ascend(0.1, 10.0, 0.2, &mut rng));
        assert!(rocket.trail().is_empty());
        assert_eq!(rocket.trail().effect(), TrailEffect::Sparkle);
    }

    #[test]
    fn payload_keeps_component_order() {
        let mut a = FireworkComponent::default();
        a.size = 0.1;
        let mut b = FireworkComponent::default();
        b.size = 0.2;
        let rocket = Rocket::new(1.0, 0.0, 5.0, vec![a.clone(), b.clone()], TrailEffect::Fade);
        assert_eq!(rocket.components().len(), 2);
        let (position, components) = rocket.into_payload();
        assert_eq!(position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(components, vec![a, b]);
    }
}
