#![allow(dead_code)]
//! Screen coordinator
//!
//! Turns key and mouse actions into round commands, tracks the board cursor
//! and the quit flag. Rejected commands are dropped; the round keeps its state.

use super::state::{Command, RoundController, RoundView};
use crate::config::GameConfig;
use crate::game::{Dictionary, Position, SIZE};
use std::time::Duration;

/// Main application coordinator
pub struct AppCoordinator<'d> {
    controller: RoundController<'d>,
    /// Highlighted cell as (row, col)
    cursor: (usize, usize),
    /// Whether the application should quit
    pub should_quit: bool,
}

impl<'d> AppCoordinator<'d> {
    pub fn new(dictionary: &'d Dictionary, config: GameConfig) -> Self {
        Self::with_controller(RoundController::new(dictionary, config))
    }

    pub fn with_controller(controller: RoundController<'d>) -> Self {
        Self {
            controller,
            cursor: (0, 0),
            should_quit: false,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor.0 * SIZE + self.cursor.1
    }

    pub fn cursor_up(&mut self) {
        self.cursor.0 = self.cursor.0.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.cursor.0 = (self.cursor.0 + 1).min(SIZE - 1);
    }

    pub fn cursor_left(&mut self) {
        self.cursor.1 = self.cursor.1.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor.1 = (self.cursor.1 + 1).min(SIZE - 1);
    }

    pub fn select_at_cursor(&mut self) -> bool {
        self.send(Command::SelectTile(self.cursor_index()))
    }

    /// Mouse click on a board cell: move the cursor there and select it.
    pub fn click(&mut self, index: usize) -> bool {
        let Ok(position) = Position::from_index(index) else {
            return false;
        };
        self.cursor = (position.row(), position.col());
        self.select_at_cursor()
    }

    /// Enter dismisses a pending notice, otherwise selects under the cursor.
    pub fn confirm(&mut self) -> bool {
        if self.controller.notice().is_some() {
            return self.acknowledge();
        }
        self.select_at_cursor()
    }

    pub fn start(&mut self) -> bool {
        self.send(Command::Start)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.send(Command::TogglePause)
    }

    pub fn acknowledge(&mut self) -> bool {
        self.send(Command::AcknowledgeNotice)
    }

    /// Leave an ended round and start the next one straight away.
    pub fn new_game(&mut self) -> bool {
        self.send(Command::NewGame) && self.send(Command::Start)
    }

    /// One second of clock time
    pub fn tick(&mut self) {
        self.send(Command::Tick);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.controller.advance(dt);
    }

    pub fn view(&self) -> RoundView<'_> {
        self.controller.snapshot()
    }

    pub fn controller(&self) -> &RoundController<'d> {
        &self.controller
    }

    fn send(&mut self, command: Command) -> bool {
        self.controller.dispatch(command).is_ok()
    }
}
