//! Simulate command: launches a recipe and steps the simulation headlessly

use anyhow::{Context, Result};
use serde::Serialize;
use sparkle_particles::{Category, FrameReport, ParticleSystem, Recipe};
use sparkle_runtime::{GameClock, RuntimeSystem};
use std::time::Duration;

pub struct SimulateArgs {
    pub recipe: String,
    pub config: Option<String>,
    pub frames: u32,
    pub fps: u32,
    pub launches: u32,
    pub every: u32,
    pub seed: Option<u32>,
    pub format: String,
    pub realtime: bool,
}

/// Totals over a whole run
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    recipe: String,
    frames: u32,
    simulated_seconds: f64,
    rockets_exploded: usize,
    particles_emitted: usize,
    particles_expired: usize,
    trails_released: usize,
    peak_active: usize,
    peak_trails: usize,
    peak_sparks: usize,
    final_active: usize,
}

impl RunSummary {
    fn record(&mut self, report: &FrameReport, system: &ParticleSystem) {
        self.frames += 1;
        self.rockets_exploded += report.rockets_exploded;
        self.particles_emitted += report.particles_emitted;
        self.particles_expired += report.expired;
        self.trails_released += report.trails_released;
        self.peak_active = self.peak_active.max(report.total_active());
        self.peak_trails = self.peak_trails.max(system.live_trail_count());
        self.peak_sparks = self.peak_sparks.max(system.live_spark_count());
        self.final_active = report.total_active();
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    let json = match args.format.as_str() {
        "text" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: {}", other),
    };

    let recipe = Recipe::load(&args.recipe)
        .with_context(|| format!("Failed to load recipe '{}'", args.recipe))?;
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let launch_y = config.min_explosion_y - 20.0;

    let mut system = ParticleSystem::new(config).context("Invalid simulation config")?;
    system.initialize()?;

    for i in 0..args.launches {
        let x = (i as f32 - (args.launches as f32 - 1.0) / 2.0) * 10.0;
        system.launch(x, launch_y, &recipe)?;
    }

    if !json {
        println!(
            "Launched {} x '{}' ({} components)",
            args.launches,
            recipe.name,
            recipe.components.len()
        );
    }

    let mut clock = GameClock::new();
    let frame_dt = 1.0 / args.fps as f64;
    log::info!(
        "simulating {} frames at {} fps{}",
        args.frames,
        args.fps,
        if args.realtime { " (real time)" } else { "" }
    );
    if args.realtime {
        clock.tick();
    }
    let mut summary = RunSummary {
        recipe: recipe.name.clone(),
        ..Default::default()
    };

    for frame in 1..=args.frames {
        let dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f64(frame_dt));
            clock.tick()
        } else {
            clock.advance(frame_dt)
        };
        let report = system.update(dt as f32);
        summary.record(&report, &system);

        if !json && args.every > 0 && frame % args.every == 0 {
            print_status(frame, clock.total_time, &report, &system);
        }
    }
    summary.simulated_seconds = clock.total_time;

    system.shutdown()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_status(frame: u32, time: f64, report: &FrameReport, system: &ParticleSystem) {
    let per_category: Vec<String> = Category::ALL
        .iter()
        .filter(|c| report.active_in(**c) > 0)
        .map(|c| format!("{}={}", c, report.active_in(*c)))
        .collect();
    println!(
        "[{:>5}] t={:>6.2}s  active={:<6} trails={:<5} rockets={} sparks={}  {}",
        frame,
        time,
        report.total_active(),
        system.live_trail_count(),
        system.rockets().len(),
        system.live_spark_count(),
        per_category.join(" ")
    );
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("Simulated {:.2}s over {} frames", summary.simulated_seconds, summary.frames);
    println!("  Rockets exploded: {}", summary.rockets_exploded);
    println!("  Particles emitted: {}", summary.particles_emitted);
    println!("  Particles expired: {}", summary.particles_expired);
    println!("  Trails released: {}", summary.trails_released);
    println!("  Peak active: {}", summary.peak_active);
    println!("  Peak trails: {}", summary.peak_trails);
    println!("  Peak ascent sparks: {}", summary.peak_sparks);
    println!("  Still active: {}", summary.final_active);
}
