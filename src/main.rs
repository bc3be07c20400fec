mod app;
mod braille;
mod config;
mod grid;
mod particle;
mod radius;
mod settings;
mod simulation;
mod snapshot;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dla-lattice")]
#[command(about = "On-lattice Diffusion-Limited Aggregation in the terminal")]
struct Args {
    /// JSON config file (defaults to the user config dir if present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file and exit
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,

    /// Side length of the lattice
    #[arg(short = 'g', long = "grid-size")]
    grid_size: Option<usize>,

    /// Number of walkers in flight
    #[arg(short = 'p', long)]
    particles: Option<usize>,

    /// Initial aggregate radius (> 0)
    #[arg(long = "init-radius")]
    init_radius: Option<f64>,

    /// Walk step magnitude (1-50)
    #[arg(short = 's', long)]
    step: Option<u32>,

    /// Simulation steps per rendered frame
    #[arg(long = "steps-per-frame")]
    steps_per_frame: Option<usize>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Directory for screenshots
    #[arg(long = "snapshot-dir")]
    snapshot_dir: Option<PathBuf>,

    /// Start with the UI hidden
    #[arg(long = "hide-ui")]
    hide_ui: bool,

    /// Run without a terminal for --frames frames
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value = "1000")]
    frames: usize,

    /// Save a snapshot when the headless run finishes
    #[arg(long)]
    snapshot: bool,

    /// Log file (the terminal UI does not log otherwise)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Command-line values take precedence over the config file
    fn apply(&self, config: &mut AppConfig) {
        let settings = &mut config.settings;
        if let Some(v) = self.grid_size {
            settings.grid_size = v;
        }
        if let Some(v) = self.particles {
            settings.num_particles = v;
        }
        if let Some(v) = self.init_radius {
            settings.init_radius = v;
        }
        if let Some(v) = self.step {
            settings.step_magnitude = v;
        }
        if let Some(v) = self.steps_per_frame {
            settings.steps_per_frame = v;
        }
        if self.seed.is_some() {
            settings.rng_seed = self.seed;
        }
        if let Some(v) = self.fps {
            config.fps = v;
        }
        if let Some(dir) = &self.snapshot_dir {
            config.snapshot_dir = dir.clone();
        }
        if self.hide_ui {
            config.show_ui = false;
        }
    }
}

fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;
        }
        // stderr would draw over the alternate screen
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;
        }
        None => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref(), args.headless)?;

    let mut config = AppConfig::resolve(args.config.as_deref())?;
    args.apply(&mut config);
    config
        .settings
        .validate()
        .context("invalid simulation settings")?;

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        println!("Saved config to {}", path.display());
        return Ok(());
    }

    let mut app = App::new(&config)?;

    if args.headless {
        return run_headless(&mut app, args.frames, args.snapshot);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.fps);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal loop failed")
}

fn run_headless(app: &mut App, frames: usize, snapshot: bool) -> Result<()> {
    let started = Instant::now();
    let report = app.simulation.run_frames(frames);

    info!(
        frames,
        steps = app.simulation.steps,
        cells = app.simulation.filled_cells(),
        radius = app.simulation.radius(),
        attached = report.attached,
        recycled = report.recycled,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "headless run finished"
    );

    if snapshot {
        let path = snapshot::save_snapshot(&app.simulation, false, &app.snapshot_dir)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    fps: u32,
) -> io::Result<()> {
    let frame_duration = Duration::from_secs_f64(1.0 / fps.max(1) as f64);

    loop {
        let frame_start = Instant::now();

        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Drain input until the frame budget is spent
        let timeout = frame_duration.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl && key.code == KeyCode::Char('c') {
                        return Ok(());
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_ui(),
                        KeyCode::Char('s') | KeyCode::Char('S') => app.take_snapshot(),
                        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                            app.increase_step()
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                            app.decrease_step()
                        }
                        _ => {}
                    }
                }
            }
        }

        // Run simulation tick
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "dla-lattice",
            "--grid-size",
            "256",
            "--step",
            "7",
            "--seed",
            "3",
            "--hide-ui",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.settings.grid_size, 256);
        assert_eq!(config.settings.step_magnitude, 7);
        assert_eq!(config.settings.rng_seed, Some(3));
        assert_eq!(config.settings.num_particles, 2500);
        assert!(!config.show_ui);
        assert_eq!(config.fps, 120);
    }

    #[test]
    fn test_second_subscriber_install_is_reported() {
        // TUI mode without a log file installs nothing
        assert!(init_tracing(None, false).is_ok());
        assert!(init_tracing(None, true).is_ok());
        let err = init_tracing(None, true).unwrap_err();
        assert!(err.to_string().contains("failed to install log subscriber"));
    }

    #[test]
    fn test_cli_out_of_range_step_fails_validation() {
        let args = Args::parse_from(["dla-lattice", "--step", "60"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert!(config.settings.validate().is_err());
    }
}
