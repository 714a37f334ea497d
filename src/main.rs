use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use sidescroll::core::{GameConfig, RuleSet, REALTIME_FRAME_MS};
use sidescroll::game::{advance, StepOutcome, World};
use sidescroll::input::{handle_game_input, InputResult};
use sidescroll::ui::render_game_scene;
use sidescroll::utils::logging::init_file_logging;
use sidescroll::utils::persistence::{app_path, load_config, save_json, CONFIG_FILE};
use sidescroll::utils::version_line;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

type Backend = CrosstermBackend<io::Stdout>;

/// Side-scrolling flap-and-dodge game for the terminal.
#[derive(Parser, Debug)]
#[command(name = "sidescroll", disable_version_flag = true)]
struct Cli {
    /// Rule set: classic or arcade
    #[arg(long)]
    rules: Option<RuleSet>,

    /// World width in canvas units
    #[arg(long)]
    width: Option<f64>,

    /// World height in canvas units
    #[arg(long)]
    height: Option<f64>,

    /// Seed for reproducible spawns
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (defaults to ~/.sidescroll/config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to ~/.sidescroll/config.json and exit
    #[arg(long)]
    write_config: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

impl Cli {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = load_config(self.config.as_deref()).context("loading config")?;
        if let Some(rules) = self.rules {
            config.rules = rules;
        }
        if let Some(width) = self.width {
            config.canvas_width = width;
        }
        if let Some(height) = self.height {
            config.canvas_height = height;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_line("sidescroll"));
        return Ok(());
    }

    let config = cli.game_config()?;

    if cli.write_config {
        let path = app_path(CONFIG_FILE)?;
        save_json(&path, &config)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    match init_file_logging(cli.verbose) {
        Ok(path) => tracing::info!(log = %path.display(), "sidescroll starting"),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, &mut rng);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

/// Frame driver. Steps at a fixed cadence, draining input between frames,
/// and stops stepping once the world is over.
fn run(
    terminal: &mut Terminal<Backend>,
    config: GameConfig,
    rng: &mut ChaCha8Rng,
) -> anyhow::Result<()> {
    let frame_interval = Duration::from_millis(REALTIME_FRAME_MS);

    let mut world = World::new(config)?;
    let mut last_step = Instant::now();
    let mut outcome: StepOutcome = advance(&mut world, 0.0, false, rng);

    'frames: loop {
        terminal.draw(|frame| {
            let area = frame.size();
            render_game_scene(frame, area, &world, &outcome);
        })?;

        let deadline = last_step + frame_interval;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                match handle_game_input(key, &mut world) {
                    InputResult::Quit => break 'frames,
                    InputResult::Restart => {
                        tracing::info!(score = world.score, "restarting");
                        world = World::new(config)?;
                        last_step = Instant::now();
                        outcome = advance(&mut world, 0.0, false, rng);
                        continue 'frames;
                    }
                    InputResult::Continue => {}
                }
            }
        }

        if outcome.game_over {
            // Idle until a key arrives
            last_step = Instant::now();
            continue;
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_step).as_secs_f64() * 1000.0;
        last_step = now;
        outcome = advance(&mut world, dt_ms, false, rng);
    }

    tracing::info!(
        score = world.score,
        distance = world.distance,
        frames = world.frame_count,
        "session ended"
    );
    Ok(())
}
