//! Check command: validates a recipe against a simulation config

use anyhow::{Context, Result};
use sparkle_particles::emission::burst_params;
use sparkle_particles::Recipe;

pub fn run(recipe_path: &str, config_path: Option<&str>) -> Result<()> {
    let recipe = Recipe::load(recipe_path)
        .with_context(|| format!("Failed to load recipe '{}'", recipe_path))?;
    let config = super::load_config(config_path)?;

    println!(
        "Recipe '{}': {} component(s), {} ascent trail",
        recipe.name,
        recipe.components.len(),
        recipe.trail_effect
    );

    let mut total = 0;
    for (i, component) in recipe.components.iter().enumerate() {
        let params = burst_params(component, &config);
        total += params.particle_count;
        println!(
            "  [{}] {:<12} -> {:<15} {:>5} particles  speed {:>6.2}  life {:.2}s{}{}",
            i,
            component.pattern.name(),
            component.shape.name(),
            params.particle_count,
            params.speed,
            component.lifetime,
            if component.trail { "  trail" } else { "" },
            if component.friction > 0.0 {
                format!("  friction {:.2}", component.friction)
            } else {
                String::new()
            },
        );
        if params.particle_count > config.max_particles {
            println!(
                "      warning: exceeds pool capacity ({}), extra particles will be dropped",
                config.max_particles
            );
        }
    }

    println!("Total per launch: {} particles", total);
    Ok(())
}
