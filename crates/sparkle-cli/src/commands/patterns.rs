//! Patterns command: lists explosion patterns with sample statistics

use anyhow::Result;
use sparkle_core::Color;
use sparkle_particles::pattern::{self, BurstParams};
use sparkle_particles::rand::ParticleRng;
use sparkle_particles::{Pattern, PatternGravities};

pub fn run(count: usize, speed: f32) -> Result<()> {
    let gravities = PatternGravities::default();
    let params = BurstParams {
        particle_count: count,
        speed,
        spread: 1.0,
        color: Color::WHITE,
        secondary_color: Color::GREEN,
    };

    println!(
        "{:<12} {:>7} {:>9} {:>9} {:>9} {:>13}  extras",
        "pattern", "gravity", "min v", "mean v", "max v", "gravity mult"
    );

    for p in Pattern::ALL {
        let mut rng = ParticleRng::new(1);
        let emissions = pattern::generate(p, &params, &mut rng);
        if emissions.is_empty() {
            println!("{:<12} {:>7.2}  (no particles)", p.name(), gravities.for_pattern(p));
            continue;
        }

        let speeds: Vec<f32> = emissions.iter().map(|e| e.velocity.length()).collect();
        let min = speeds.iter().copied().fold(f32::INFINITY, f32::min);
        let max = speeds.iter().copied().fold(0.0, f32::max);
        let mean = speeds.iter().sum::<f32>() / speeds.len() as f32;
        let g_min = emissions
            .iter()
            .map(|e| e.gravity_multiplier)
            .fold(f32::INFINITY, f32::min);
        let g_max = emissions
            .iter()
            .map(|e| e.gravity_multiplier)
            .fold(0.0, f32::max);

        let mut extras = Vec::new();
        if emissions.iter().any(|e| e.offset.length() > 0.0) {
            extras.push("offset");
        }
        if emissions.iter().any(|e| e.acceleration.length() > 0.0) {
            extras.push("acceleration");
        }
        if emissions.iter().any(|e| e.color != params.color) {
            extras.push("two-color");
        }

        println!(
            "{:<12} {:>7.2} {:>9.2} {:>9.2} {:>9.2} {:>6.2}..{:<5.2}  {}",
            p.name(),
            gravities.for_pattern(p),
            min,
            mean,
            max,
            g_min,
            g_max,
            extras.join(", ")
        );
    }

    Ok(())
}
