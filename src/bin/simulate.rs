//! Headless simulator CLI.
//!
//! Plays many games with an autopilot and reports how they went.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # 100 classic games
//!   cargo run --bin simulate -- -n 500 --rules arcade
//!   cargo run --bin simulate -- --seed 42 --json     # Reproducible, JSON out

use anyhow::Context;
use clap::Parser;
use sidescroll::core::{GameConfig, RuleSet};
use sidescroll::simulator::{run_simulation, SimConfig};
use sidescroll::utils::logging::init_stderr_logging;
use sidescroll::utils::version_line;

#[derive(Parser, Debug)]
#[command(name = "simulate", disable_version_flag = true)]
struct Cli {
    /// Number of games
    #[arg(short = 'n', long, default_value_t = 100)]
    runs: u32,

    /// Rule set: classic or arcade
    #[arg(long, default_value = "classic")]
    rules: RuleSet,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Frame cap per game
    #[arg(long, default_value_t = 20_000)]
    max_frames: u64,

    /// World width in canvas units
    #[arg(long)]
    width: Option<f64>,

    /// World height in canvas units
    #[arg(long)]
    height: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log each finished game
    #[arg(short, long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_line("simulate"));
        return Ok(());
    }

    init_stderr_logging(cli.verbose);

    let mut game = GameConfig::with_rules(cli.rules);
    if let Some(width) = cli.width {
        game.canvas_width = width;
    }
    if let Some(height) = cli.height {
        game.canvas_height = height;
    }

    let config = SimConfig {
        num_runs: cli.runs,
        seed: cli.seed,
        max_frames_per_run: cli.max_frames,
        game,
    };

    tracing::info!(
        runs = config.num_runs,
        rules = %config.game.rules,
        seed = ?config.seed,
        "running simulation"
    );

    let report = run_simulation(&config).context("simulation config")?;

    if cli.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }

    Ok(())
}
