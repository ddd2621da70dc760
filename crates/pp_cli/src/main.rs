//! PowerPlay match runner CLI
//!
//! Plays headless matches against the core and prints the result.
//! Logging follows `RUST_LOG` (default `info`).

mod runner;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pp_core::engine::timestep::DEFAULT_DT;
use tracing::info;
use tracing_subscriber::prelude::*;

use runner::{load_config, run_match, RunOptions};

#[derive(Parser)]
#[command(name = "pp_cli")]
#[command(about = "Run PowerPlay arena matches headless", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print the score
    Simulate {
        /// RNG seed (overrides the config's seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Match length in seconds of simulated time
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,

        /// Fixed step in seconds
        #[arg(long, default_value_t = DEFAULT_DT)]
        dt: f32,

        /// Built-in preset (default, arcade)
        #[arg(long, default_value = "default")]
        preset: String,

        /// JSON or YAML config file; replaces the preset
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write every tick snapshot as a JSON line
        #[arg(long)]
        snapshots: Option<PathBuf>,

        /// Drive team A with a scripted chaser instead of the AI
        #[arg(long, default_value = "false")]
        scripted_a: bool,

        /// Print the summary as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a preset config as pretty JSON
    Config {
        #[arg(long, default_value = "default")]
        preset: String,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, seconds, dt, preset, config, snapshots, scripted_a, json } => {
            let match_config = load_config(&preset, config.as_deref(), seed)?;
            let opts = RunOptions { seconds, dt, scripted_a };

            let summary = match snapshots {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating snapshot file {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    let summary = run_match(match_config, &opts, Some(&mut writer))?;
                    writer.flush().context("flushing snapshots")?;
                    info!(path = %path.display(), "snapshots written");
                    summary
                }
                None => run_match(match_config, &opts, None)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Seed {}  ({} ticks, {:.1}s)", summary.seed, summary.ticks, summary.clock);
                println!(
                    "Score  A {} - {} B   (points {} - {})",
                    summary.score.goals_a, summary.score.goals_b, summary.score.points_a, summary.score.points_b
                );
                for (kind, count) in &summary.events {
                    println!("   {:<12} {}", kind, count);
                }
            }
        }

        Commands::Config { preset } => {
            let cfg = load_config(&preset, None, None)?;
            println!("{}", cfg.to_json_pretty()?);
        }
    }

    Ok(())
}
