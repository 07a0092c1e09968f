//! Word Swap - slide letters across an 8x8 board to spell words
//!
//! Move a tile along empty cells, line up five to eight letters, empty the bag
//! before the board fills up.

mod app;
mod config;
mod game;
mod tui;

use app::AppCoordinator;
use clap::Parser;
use config::Cli;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use game::Dictionary;
use ratatui::layout::Rect;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui::Tui;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_path())?;

    let dictionary = Dictionary::embedded();
    tracing::info!(words = dictionary.len(), "dictionary loaded");

    let mut app = AppCoordinator::new(dictionary, cli.game_config());

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    // Clock ticks once a second, move frames are redrawn much faster
    let tick_rate = Duration::from_secs(1);
    let frame_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();
    let mut last_frame = Instant::now();
    let mut board = Rect::default();

    loop {
        terminal.draw(|frame| board = tui::render(frame, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO)
            .min(frame_rate);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('s') => {
                        app.start();
                    }
                    KeyCode::Char('p') => {
                        app.toggle_pause();
                    }
                    KeyCode::Char('n') => {
                        app.new_game();
                    }
                    KeyCode::Up => app.cursor_up(),
                    KeyCode::Down => app.cursor_down(),
                    KeyCode::Left => app.cursor_left(),
                    KeyCode::Right => app.cursor_right(),
                    KeyCode::Char(' ') => {
                        app.select_at_cursor();
                    }
                    KeyCode::Enter => {
                        app.confirm();
                    }
                    KeyCode::Esc => {
                        app.acknowledge();
                    }
                    _ => {}
                },
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(index) = tui::cell_at(board, mouse.column, mouse.row) {
                        app.click(index);
                    }
                }
                _ => {}
            }
        }

        app.advance(last_frame.elapsed());
        last_frame = Instant::now();

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    let state = app.controller().state();
    tracing::info!(
        phase = state.phase.label(),
        bag = state.bag_remaining,
        empty = state.empty_cells,
        session = app.controller().scores().session_total(),
        "quitting"
    );
    Ok(())
}

/// Log to a file, the terminal belongs to the game. `RUST_LOG` overrides the filter.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordswap=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
