use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use gridsnake::config::{load_settings, settings_path, Settings};
use gridsnake::input::{quadrant_direction, GameInput, InputHandler};
use gridsnake::renderer::{self, SurfaceLayout};
use gridsnake::round::{RoundLifecycle, RoundState};
use gridsnake::terminal_runtime::{install_panic_hook, TerminalSession};
use gridsnake::ui::hud::HudInfo;
use log::{error, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Edge length of one grid cell in surface units.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Do not capture the mouse; quadrant clicks are disabled.
    #[arg(long = "no-mouse")]
    no_mouse: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    info!("starting with {settings:?}");

    let mouse_enabled = !cli.no_mouse;
    install_panic_hook(mouse_enabled);

    let mut session = TerminalSession::enter(mouse_enabled)?;
    let result = run(&mut session, settings, mouse_enabled);
    if let Err(error) = &result {
        error!("terminal loop failed: {error}");
    }
    result
}

fn resolve_settings(cli: &Cli) -> io::Result<Settings> {
    let path = cli.config.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path).map_err(|error| {
        io::Error::new(
            error.kind(),
            format!("failed to load settings from {}: {error}", path.display()),
        )
    })?;

    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_interval_ms = tick_ms;
    }
    if let Some(cell_size) = cli.cell_size {
        settings.cell_size = cell_size;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    settings.validate()?;
    Ok(settings)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(session: &mut TerminalSession, settings: Settings, mouse_enabled: bool) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut layout = SurfaceLayout::fit(session.area()?, &settings)?;
    let mut round = RoundLifecycle::new(layout.grid, settings.seed);

    let tick_interval = settings.tick_interval();
    let hud = HudInfo {
        tick_interval,
        mouse_enabled,
    };
    let mut next_tick = Instant::now() + tick_interval;

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &round, &layout, hud))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(game_input) = input.poll_input(timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Resize => {
                    layout = SurfaceLayout::fit(session.area()?, &settings)?;
                    round.resize(layout.grid);
                }
                other => handle_input(&mut round, &layout, other)?,
            }
        }

        if Instant::now() >= next_tick {
            if round.state() == RoundState::Running {
                round.tick()?;
            }
            next_tick = Instant::now() + tick_interval;
        }
    }

    info!("quit with score {}", round.score());
    Ok(())
}

fn handle_input(
    round: &mut RoundLifecycle,
    layout: &SurfaceLayout,
    input: GameInput,
) -> io::Result<()> {
    match (round.state(), input) {
        (RoundState::Running, GameInput::Direction(direction)) => {
            round.submit_direction(direction)?;
        }
        (RoundState::Running, GameInput::PointerAt { column, row }) => {
            round.submit_direction(quadrant_direction(layout.inner, column, row))?;
        }
        (RoundState::Idle | RoundState::Ended, GameInput::Confirm) => round.start()?,
        (RoundState::Idle | RoundState::Ended, GameInput::PointerAt { .. }) => round.start()?,
        _ => {}
    }
    Ok(())
}
