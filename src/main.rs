//! termtris runner (default binary).
//!
//! Prints the key help, waits for Enter, then runs the game loop on the real
//! terminal with crossterm input and the framebuffer renderer.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::info;

use termtris::config::Config;
use termtris::core::{EndReason, Game, GameEnd, GameState, SystemClock};
use termtris::input::{InterruptFlag, TerminalInput};
use termtris::term::{TerminalRenderer, TerminalSession};

#[derive(Debug, Parser)]
#[command(name = "termtris", version, about = "Falling-block puzzle game for terminals")]
struct Cli {
    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u32>,

    /// Config file (default: $TERMTRIS_CONFIG or the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start immediately instead of waiting for Enter
    #[arg(long)]
    no_confirm: bool,

    /// Start with the numeric board overlay shown
    #[arg(long)]
    debug_overlay: bool,
}

const BANNER: &str = "
termtris - falling blocks for terminals

    Use the arrow keys or vi keys to play:

         Arrow keys                    vi keys
         ========================      ========================
         Down/Left/Right -- move       j/h/l   -- move down/left/right
         Up              -- rotate     <space> -- rotate

    'p' to pause, 'q' to quit, 'r' to redraw, 'z' for the debug grid.

";

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (mut config, source) = Config::discover(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    config.debug_overlay |= cli.debug_overlay;

    init_logging(&config)?;
    info!("{}", source.describe());
    info!("config: {:?}", config);

    if !cli.no_confirm {
        wait_for_enter()?;
    }

    let seed = config.seed.unwrap_or_else(time_seed);
    info!("seed {}", seed);

    let interrupt = InterruptFlag::install().context("failed to install signal handlers")?;
    let mut session = TerminalSession::enter()?;
    let mut game = Game::new(
        GameState::new(seed),
        TerminalInput::with_interrupt_flag(interrupt),
        TerminalRenderer::new(),
        SystemClock,
        config.game_settings(),
    );
    let outcome = game.run();
    let restored = session.restore();

    let code = report_end(
        &mut io::stdout(),
        &mut io::stderr(),
        game.state().score(),
        restored,
        outcome,
    )?;
    Ok(ExitCode::from(code))
}

/// Print the final row count, then surface any teardown or loop error.
fn report_end(
    out: &mut impl Write,
    err: &mut impl Write,
    rows: u32,
    restored: Result<()>,
    outcome: io::Result<GameEnd>,
) -> Result<u8> {
    writeln!(out, "Total rows: {rows}")?;
    restored?;
    let end = outcome.context("game loop failed")?;
    if end.reason == EndReason::Interrupted {
        writeln!(err, "SIGINT: terminating")?;
    }
    Ok(end.exit_code())
}

/// Logs go to a file since the terminal is in raw mode while playing.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    let mut stderr = io::stderr();
    write!(stderr, "{BANNER}Hit Enter to start: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(())
}

fn time_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
