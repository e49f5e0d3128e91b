//! Sparkle CLI - Headless driver for the firework particle simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, patterns, simulate};

#[derive(Parser)]
#[command(name = "sparkle")]
#[command(about = "Headless firework particle simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch a recipe and step the simulation at a fixed frame rate
    Simulate {
        /// Path to recipe file
        recipe: String,

        /// Path to simulation config (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "300")]
        frames: u32,

        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Rockets launched side by side on the first frame
        #[arg(long, default_value = "1")]
        launches: u32,

        /// Print a status line every N frames (0 = summary only)
        #[arg(long, default_value = "30")]
        every: u32,

        /// Override the config's random seed
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Pace frames against the wall clock instead of stepping 1/fps
        #[arg(long)]
        realtime: bool,
    },

    /// List explosion patterns with sample emission statistics
    Patterns {
        /// Particles generated per pattern sample
        #[arg(long, default_value = "100")]
        count: usize,

        /// Burst speed for the sample
        #[arg(long, default_value = "10")]
        speed: f32,
    },

    /// Validate a recipe and optionally a simulation config
    Check {
        /// Path to recipe file
        recipe: String,

        /// Path to simulation config (TOML)
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            recipe,
            config,
            frames,
            fps,
            launches,
            every,
            seed,
            format,
            realtime,
        } => simulate::run(simulate::SimulateArgs {
            recipe,
            config,
            frames,
            fps,
            launches,
            every,
            seed,
            format,
            realtime,
        }),
        Commands::Patterns { count, speed } => patterns::run(count, speed),
        Commands::Check { recipe, config } => check::run(&recipe, config.as_deref()),
    }
}
