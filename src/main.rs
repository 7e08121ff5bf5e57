//! Delve - Entry Point
//!
//! Loads the config, generates the level, and runs the terminal loop.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use delve::game::Game;
use delve::ui;
use delve::GameConfig;

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 30;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

fn main() -> Result<()> {
    init_logging();
    log::info!("Starting Delve v{}", env!("CARGO_PKG_VERSION"));

    // Build everything before touching the terminal so failures print normally
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref())
        .context("could not load configuration")?;
    let mut game = Game::new(config).context("could not create the level")?;

    let result = {
        // Restores the terminal on every exit path, including setup failures
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let result = run_game_loop(&mut terminal, &mut game);
        terminal.show_cursor()?;
        result
    };

    if let Err(ref e) = result {
        log::error!("Game exited with error: {:#}", e);
    }

    log::info!(
        "Delve shut down cleanly (seed {:?}, {} tiles seen)",
        game.seed(),
        game.level().seen_count()
    );
    result
}

/// Raw mode plus alternate screen, undone on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // From here on, dropping the guard undoes raw mode even if the rest fails
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            log::warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Log to a file so output does not interfere with the TUI
fn init_logging() {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("delve.log");

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(log_target(file))
        .init();
}

/// Write to the log file, or discard everything if it could not be opened
fn log_target(file: io::Result<File>) -> env_logger::Target {
    match file {
        Ok(file) => env_logger::Target::Pipe(Box::new(file)),
        Err(_) => env_logger::Target::Pipe(Box::new(io::sink())),
    }
}

/// Main game loop
fn run_game_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, game: &mut Game) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        terminal.draw(|frame| ui::draw(frame, game))?;

        // Block until the next frame is due, then apply at most one key
        let timeout = FRAME_TIME.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = ui::action_for_key(key, game.state()) {
                    game.handle_action(action);
                }
            }
        }

        if game.should_quit() {
            break;
        }
    }

    Ok(())
}
