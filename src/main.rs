use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::app::{App, AppSettings};
use grid_snake::config::{
    DEFAULT_COLS, DEFAULT_LOG_FILE, DEFAULT_ROWS, DEFAULT_TICK_INTERVAL_MS, FRAME_POLL_MS,
    MIN_TICK_INTERVAL_MS,
};
use grid_snake::input::InputHandler;
use grid_snake::renderer;
use grid_snake::terminal_runtime::TerminalSession;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about = "Classic snake on a fixed grid, in the terminal")]
struct Cli {
    /// Grid rows.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u16,

    /// Grid columns.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: u16,

    /// Milliseconds between snake moves.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed food placement for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal itself is taken by the game.
    #[arg(long = "log-file", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = AppSettings {
        rows: cli.rows,
        cols: cli.cols,
        tick_interval: Duration::from_millis(cli.tick_ms.max(MIN_TICK_INTERVAL_MS)),
        seed: cli.seed,
    };
    let app = App::new(settings, Instant::now())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    info!(
        "starting {}x{} grid, tick {:?}, seed {:?}",
        settings.rows, settings.cols, settings.tick_interval, settings.seed
    );

    let result = run(app);
    if let Err(error) = &result {
        error!("frontend stopped: {error}");
    }
    result
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let file = File::create(&cli.log_file)?;
    WriteLogger::init(LevelFilter::Info, Config::default(), file)
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error))
}

fn run(mut app: App) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new(Duration::from_millis(FRAME_POLL_MS));

    loop {
        session.draw(|frame| renderer::render(frame, &app))?;

        if let Some(game_input) = input.poll_input()? {
            app.handle_input(game_input, Instant::now())
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
        }
        if app.should_quit() {
            break;
        }

        app.update(Instant::now());
    }

    info!(
        "quit after {} rounds, best score {}",
        app.round() + 1,
        app.best_score()
    );
    Ok(())
}
