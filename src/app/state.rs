#![allow(dead_code)]
//! Round state machine
//!
//! The controller exclusively owns the board, the bag, the clock and the
//! scores. Every player or clock event enters through
//! [`RoundController::dispatch`]. A move (or a timeout refill) is committed in
//! full inside one call; the snapshots it leaves behind are replayed by
//! [`RoundController::advance`] purely for display, and no other move, pause
//! or tick is taken until they have played out.

use super::timer::{format_mm_ss, RoundTimer};
use crate::config::GameConfig;
use crate::game::{
    Dictionary, FoundWord, GameError, Grid, LetterBag, Outcome, PathFinder, Position, ScoreKeeper,
    WordScanner,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shown when two selected tiles are not connected by empty cells
pub const ILLEGAL_MOVE_NOTICE: &str = "Move impossible.";

static NOTHING_DELETED: BTreeSet<usize> = BTreeSet::new();

/// Where the round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Ended(Outcome),
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Ended(_) => "ended",
        }
    }
}

/// Everything the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    /// Start when idle, otherwise flip between running and paused
    TogglePause,
    /// First call picks the origin, second picks the destination and plays the move
    SelectTile(usize),
    AcknowledgeNotice,
    /// One second of clock time
    Tick,
    /// Leave an ended round for a fresh idle one
    NewGame,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "toggle pause",
            Command::SelectTile(_) => "tile selection",
            Command::AcknowledgeNotice => "acknowledge",
            Command::Tick => "tick",
            Command::NewGame => "new game",
        }
    }
}

/// Compact round status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub remaining_seconds: u32,
    pub empty_cells: usize,
    pub bag_remaining: usize,
    pub phase: Phase,
}

/// One frame of a resolving move, held on screen for `hold`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub grid: Grid,
    /// Path cells walked so far, current step last
    pub trail: Vec<usize>,
    /// Cells about to vanish
    pub deleted: BTreeSet<usize>,
    /// Cells that just received a letter
    pub spawned: Vec<usize>,
    pub hold: Duration,
}

#[derive(Debug, Clone, Default)]
struct Presentation {
    stages: VecDeque<Stage>,
    elapsed: Duration,
}

impl Presentation {
    fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        while let Some(hold) = self.stages.front().map(|s| s.hold) {
            if self.elapsed < hold {
                break;
            }
            self.elapsed -= hold;
            self.stages.pop_front();
        }
    }

    fn current(&self) -> Option<&Stage> {
        self.stages.front()
    }

    fn is_finished(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Read-only picture of the round for rendering
#[derive(Debug, Clone)]
pub struct RoundView<'a> {
    /// Board to draw: the presented frame while a move resolves, else the live board
    pub grid: &'a Grid,
    pub trail: &'a [usize],
    pub deleted: &'a BTreeSet<usize>,
    pub spawned: &'a [usize],
    /// First tile of a pending selection
    pub origin: Option<usize>,
    pub phase: Phase,
    pub busy: bool,
    pub notice: Option<&'a str>,
    pub seconds_left: u32,
    /// Remaining time as `mm:ss`
    pub time_left: String,
    pub round_score: u32,
    pub session_score: u32,
    pub last_batch: u32,
    pub bag_remaining: usize,
    pub found_words: &'a [FoundWord],
}

pub struct RoundController<'d> {
    config: GameConfig,
    dictionary: &'d Dictionary,
    rng: StdRng,
    phase: Phase,
    grid: Grid,
    bag: LetterBag,
    timer: RoundTimer,
    scores: ScoreKeeper,
    origin: Option<Position>,
    notice: Option<String>,
    presentation: Option<Presentation>,
    /// Letters cleared off the board this round
    removed: usize,
}

impl<'d> RoundController<'d> {
    pub fn new(dictionary: &'d Dictionary, config: GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            timer: RoundTimer::new(config.round_duration),
            config,
            dictionary,
            rng,
            phase: Phase::Idle,
            grid: Grid::new(),
            bag: LetterBag::standard(),
            scores: ScoreKeeper::new(),
            origin: None,
            notice: None,
            presentation: None,
            removed: 0,
        }
    }

    /// Single entry point for player and clock events.
    pub fn dispatch(&mut self, command: Command) -> Result<(), GameError> {
        let result = match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => match self.phase {
                Phase::Idle => self.start(),
                Phase::Paused => self.resume(),
                _ => self.pause(),
            },
            Command::SelectTile(index) => self.select_tile(index),
            Command::AcknowledgeNotice => self.acknowledge_notice(),
            Command::Tick => {
                self.tick();
                Ok(())
            }
            Command::NewGame => self.new_game(),
        };
        if let Err(err) = &result {
            debug!(command = command.label(), %err, "command rejected");
        }
        result
    }

    /// Move the display forward by `dt`. Ends the busy period once the
    /// last frame has been shown.
    pub fn advance(&mut self, dt: Duration) {
        let finished = match self.presentation.as_mut() {
            Some(presentation) => {
                presentation.advance(dt);
                presentation.is_finished()
            }
            None => return,
        };
        if finished {
            self.presentation = None;
            debug!("move presentation finished");
        }
    }

    fn start(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Idle {
            return Err(self.reject(Command::Start));
        }
        self.reset_round();
        self.phase = Phase::Running;

        let letters = self.bag.draw_up_to(self.config.seed_letters, &mut self.rng);
        let spawned = self.grid.place_random(&letters, &mut self.rng);
        info!(
            letters = %letters.iter().collect::<String>(),
            bag = self.bag.remaining(),
            "round started"
        );

        let mut stages = Vec::new();
        self.clear_matches(&mut stages, spawned);
        self.check_exhausted();
        self.present(stages);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), GameError> {
        if self.presentation.is_some() {
            return Err(GameError::SequenceInFlight);
        }
        if self.phase != Phase::Running {
            return Err(self.reject(Command::Pause));
        }
        if self.notice.is_some() {
            return Err(GameError::NoticePending);
        }
        self.phase = Phase::Paused;
        info!(remaining = self.timer.remaining(), "round paused");
        Ok(())
    }

    fn resume(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Paused {
            return Err(self.reject(Command::Resume));
        }
        self.phase = Phase::Running;
        info!(remaining = self.timer.remaining(), "round resumed");
        Ok(())
    }

    fn new_game(&mut self) -> Result<(), GameError> {
        if self.presentation.is_some() {
            return Err(GameError::SequenceInFlight);
        }
        if !matches!(self.phase, Phase::Ended(_)) {
            return Err(self.reject(Command::NewGame));
        }
        self.reset_round();
        self.phase = Phase::Idle;
        Ok(())
    }

    fn acknowledge_notice(&mut self) -> Result<(), GameError> {
        if self.notice.take().is_none() {
            return Err(self.reject(Command::AcknowledgeNotice));
        }
        self.origin = None;
        Ok(())
    }

    fn select_tile(&mut self, index: usize) -> Result<(), GameError> {
        if self.phase != Phase::Running {
            return Err(self.reject(Command::SelectTile(index)));
        }
        if self.notice.is_some() {
            return Err(GameError::NoticePending);
        }
        if self.presentation.is_some() {
            return Err(GameError::SequenceInFlight);
        }

        let position = Position::from_index(index)?;
        match self.origin.take() {
            None => {
                debug!(%position, "origin selected");
                self.origin = Some(position);
                Ok(())
            }
            Some(origin) => self.play_move(origin, position),
        }
    }

    fn tick(&mut self) {
        let live =
            self.phase == Phase::Running && self.notice.is_none() && self.presentation.is_none();
        if !self.timer.tick_if_running(live) {
            return;
        }

        info!(empty = self.grid.empty_count(), "time is up");
        self.origin = None;
        let mut stages = Vec::new();
        self.refill_or_lose(&mut stages);
        self.present(stages);
    }

    /// Validate the swap path, then swap, clear words and refill in one go.
    /// An illegal move changes nothing but the notice.
    fn play_move(&mut self, origin: Position, destination: Position) -> Result<(), GameError> {
        let path = PathFinder::find(&self.grid, origin, destination);
        if path.is_empty() {
            warn!(%origin, %destination, "no path between tiles");
            self.notice = Some(ILLEGAL_MOVE_NOTICE.to_string());
            return Err(GameError::IllegalMove {
                from: origin,
                to: destination,
            });
        }

        let steps = path.indices();
        let mut stages: Vec<Stage> = (1..=steps.len())
            .map(|walked| Stage {
                grid: self.grid.clone(),
                trail: steps[..walked].to_vec(),
                deleted: BTreeSet::new(),
                spawned: Vec::new(),
                hold: self.config.step_delay,
            })
            .collect();

        self.grid.swap(origin.index(), destination.index());
        info!(%origin, %destination, steps = steps.len(), "tiles swapped");

        self.clear_matches(&mut stages, Vec::new());
        self.refill_or_lose(&mut stages);
        self.present(stages);
        Ok(())
    }

    /// Lose when the board has no room for a refill, else refill, clear
    /// words and restart the clock.
    fn refill_or_lose(&mut self, stages: &mut Vec<Stage>) {
        let empty = self.grid.empty_count();
        if empty < self.config.refill_letters {
            info!(empty, "no room left for a refill");
            self.finish(Outcome::Lost);
            return;
        }

        let letters = self.bag.draw_up_to(self.config.refill_letters, &mut self.rng);
        let spawned = self.grid.place_random(&letters, &mut self.rng);
        debug!(
            letters = %letters.iter().collect::<String>(),
            bag = self.bag.remaining(),
            "board refilled"
        );

        self.clear_matches(stages, spawned);
        if !self.check_exhausted() {
            self.timer.reset();
        }
    }

    /// Scan the board, then score and remove whatever matched.
    fn clear_matches(&mut self, stages: &mut Vec<Stage>, spawned: Vec<usize>) {
        let report = WordScanner::new(self.dictionary).scan(&self.grid);
        if report.is_empty() && spawned.is_empty() {
            return;
        }

        stages.push(Stage {
            grid: self.grid.clone(),
            trail: Vec::new(),
            deleted: report.removal.clone(),
            spawned,
            hold: self.config.delete_delay,
        });
        if report.is_empty() {
            return;
        }

        for found in report.words() {
            info!(
                word = %found.word,
                line = found.line,
                orientation = ?found.orientation,
                "word matched"
            );
        }
        let points = self.scores.record(&report);
        self.removed += self.grid.clear_indices(&report.removal);
        info!(points, round = self.scores.round_total(), "matches cleared");
    }

    /// An empty bag wins the round.
    fn check_exhausted(&mut self) -> bool {
        if self.bag.is_empty() {
            self.finish(Outcome::Won);
            return true;
        }
        false
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Ended(outcome);
        self.origin = None;
        let session = self.scores.settle(outcome);
        info!(
            outcome = outcome.label(),
            round = self.scores.round_total(),
            session,
            "round over"
        );
    }

    fn present(&mut self, stages: Vec<Stage>) {
        if !stages.is_empty() {
            self.presentation = Some(Presentation {
                stages: stages.into(),
                elapsed: Duration::ZERO,
            });
        }
    }

    fn reset_round(&mut self) {
        self.grid = Grid::new();
        self.bag = LetterBag::standard();
        self.timer = RoundTimer::new(self.config.round_duration);
        self.scores.start_round();
        self.origin = None;
        self.notice = None;
        self.presentation = None;
        self.removed = 0;
    }

    fn reject(&self, command: Command) -> GameError {
        GameError::InvalidCommand {
            phase: self.phase.label(),
            command: command.label(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bag(&self) -> &LetterBag {
        &self.bag
    }

    pub fn scores(&self) -> &ScoreKeeper {
        &self.scores
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// A committed move or refill is still being presented.
    pub fn is_busy(&self) -> bool {
        self.presentation.is_some()
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn state(&self) -> RoundState {
        RoundState {
            remaining_seconds: self.timer.remaining(),
            empty_cells: self.grid.empty_count(),
            bag_remaining: self.bag.remaining(),
            phase: self.phase,
        }
    }

    pub fn snapshot(&self) -> RoundView<'_> {
        let stage = self.presentation.as_ref().and_then(Presentation::current);
        RoundView {
            grid: stage.map_or(&self.grid, |s| &s.grid),
            trail: stage.map_or(&[][..], |s| s.trail.as_slice()),
            deleted: stage.map_or(&NOTHING_DELETED, |s| &s.deleted),
            spawned: stage.map_or(&[][..], |s| s.spawned.as_slice()),
            origin: self.origin.map(|p| p.index()),
            phase: self.phase,
            busy: self.presentation.is_some(),
            notice: self.notice.as_deref(),
            seconds_left: self.timer.remaining(),
            time_left: format_mm_ss(self.timer.remaining()),
            round_score: self.scores.round_total(),
            session_score: self.scores.session_total(),
            last_batch: self.scores.last_batch(),
            bag_remaining: self.bag.remaining(),
            found_words: self.scores.found_words(),
        }
    }

    /// A running round on a prepared board.
    #[cfg(test)]
    pub(crate) fn with_board(
        dictionary: &'d Dictionary,
        config: GameConfig,
        grid: Grid,
        bag: LetterBag,
    ) -> Self {
        let mut controller = Self::new(dictionary, config);
        controller.grid = grid;
        controller.bag = bag;
        controller.phase = Phase::Running;
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::score::score_of;
    use crate::game::grid::CELL_COUNT;

    fn config() -> GameConfig {
        GameConfig {
            rng_seed: Some(42),
            ..GameConfig::default()
        }
    }

    /// Board with every cell filled except the listed ones
    fn full_board_except(empty: &[usize]) -> Grid {
        let mut grid = Grid::new();
        for index in 0..CELL_COUNT {
            if !empty.contains(&index) {
                grid.set(index, Some('X'));
            }
        }
        grid
    }

    fn settle(controller: &mut RoundController) {
        controller.advance(Duration::from_secs(60));
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_new_controller_is_idle() {
        let dictionary = Dictionary::default();
        let controller = RoundController::new(&dictionary, config());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.grid().letter_count(), 0);
        assert_eq!(controller.state().remaining_seconds, 60);
    }

    #[test]
    fn test_start_seeds_board() {
        let dictionary = Dictionary::default();
        let mut controller = RoundController::new(&dictionary, config());

        controller.dispatch(Command::Start).unwrap();
        assert_eq!(controller.phase(), Phase::Running);
        assert_eq!(controller.grid().letter_count(), 8);
        assert_eq!(controller.bag().remaining(), 192);
        assert_eq!(controller.snapshot().spawned.len(), 8);
        assert!(controller.is_busy());

        settle(&mut controller);
        assert_eq!(controller.snapshot().time_left, "01:00");
    }

    #[test]
    fn test_start_only_from_idle() {
        let dictionary = Dictionary::default();
        let mut controller = RoundController::new(&dictionary, config());
        controller.dispatch(Command::Start).unwrap();
        settle(&mut controller);

        assert_eq!(
            controller.dispatch(Command::Start),
            Err(GameError::InvalidCommand {
                phase: "running",
                command: "start"
            })
        );
    }

    #[test]
    fn test_move_through_empty_cells() {
        let dictionary = Dictionary::default();
        let grid = Grid::from_rows(&["A"]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid, LetterBag::standard());

        controller.dispatch(Command::SelectTile(0)).unwrap();
        assert_eq!(controller.snapshot().origin, Some(0));
        controller.dispatch(Command::SelectTile(2)).unwrap();
        assert_eq!(controller.snapshot().origin, None);

        // The path is walked one cell at a time over the old board
        assert_eq!(controller.snapshot().trail, &[0]);
        assert_eq!(controller.snapshot().grid.get(0), Some('A'));
        controller.advance(Duration::from_millis(200));
        assert_eq!(controller.snapshot().trail, &[0, 1]);
        controller.advance(Duration::from_millis(200));
        assert_eq!(controller.snapshot().trail, &[0, 1, 2]);
        controller.advance(Duration::from_millis(200));

        // Then the refill frame
        let spawned = controller.snapshot().spawned.to_vec();
        assert_eq!(spawned.len(), 3);
        assert!(!spawned.contains(&2));

        let grid = controller.grid();
        assert_eq!(grid.get(2), Some('A'));
        if !spawned.contains(&0) {
            assert_eq!(grid.get(0), None);
        }
        if !spawned.contains(&1) {
            assert_eq!(grid.get(1), None);
        }
        assert_eq!(grid.letter_count(), 4);
        assert_eq!(controller.bag().remaining(), 197);
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let dictionary = Dictionary::default();
        let grid = Grid::from_rows(&["AB", "C"]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid.clone(), LetterBag::standard());

        controller.dispatch(Command::SelectTile(0)).unwrap();
        let result = controller.dispatch(Command::SelectTile(63));
        assert_eq!(
            result,
            Err(GameError::IllegalMove {
                from: Position::new(0, 0).unwrap(),
                to: Position::new(7, 7).unwrap(),
            })
        );
        assert_eq!(controller.notice(), Some(ILLEGAL_MOVE_NOTICE));
        assert_eq!(controller.grid(), &grid);
        assert_eq!(controller.bag().remaining(), 200);
        assert_eq!(controller.scores().round_total(), 0);
        assert!(!controller.is_busy());

        // Input and clock wait for the notice
        assert_eq!(
            controller.dispatch(Command::SelectTile(1)),
            Err(GameError::NoticePending)
        );
        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.state().remaining_seconds, 60);

        controller.dispatch(Command::AcknowledgeNotice).unwrap();
        assert_eq!(controller.notice(), None);
        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.state().remaining_seconds, 59);
    }

    #[test]
    fn test_no_room_after_move_loses() {
        let dictionary = Dictionary::default();
        let grid = full_board_except(&[62, 63]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid, LetterBag::standard());

        controller.dispatch(Command::SelectTile(0)).unwrap();
        controller.dispatch(Command::SelectTile(1)).unwrap();

        assert_eq!(controller.state().empty_cells, 2);
        assert_eq!(controller.phase(), Phase::Ended(Outcome::Lost));
        assert_eq!(controller.bag().remaining(), 200);
        assert_eq!(controller.scores().session_total(), 0);
    }

    #[test]
    fn test_matched_word_is_scored_and_removed() {
        let dictionary = Dictionary::from_words(["libre"]);
        let grid = Grid::from_rows(&["LIBR", "____E"]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid, LetterBag::standard());

        controller.dispatch(Command::SelectTile(12)).unwrap();
        controller.dispatch(Command::SelectTile(4)).unwrap();

        assert_eq!(controller.scores().round_total(), score_of("LIBRE"));
        assert_eq!(controller.removed(), 5);
        assert_eq!(controller.snapshot().found_words[0].word, "LIBRE");
        // Only the three refill letters remain
        assert_eq!(controller.grid().letter_count(), 3);

        // Skip the path frames: the blink frame shows the word before removal
        controller.advance(Duration::from_millis(400));
        let view = controller.snapshot();
        assert_eq!(view.deleted, &BTreeSet::from([0, 1, 2, 3, 4]));
        assert_eq!(view.grid.get(4), Some('E'));
    }

    #[test]
    fn test_emptying_the_bag_wins() {
        let dictionary = Dictionary::from_words(["libre"]);
        let grid = Grid::from_rows(&["LIBR", "____E"]);
        let bag = LetterBag::from_counts(&[('Z', 1)]);
        let mut controller = RoundController::with_board(&dictionary, config(), grid, bag);

        controller.dispatch(Command::SelectTile(12)).unwrap();
        controller.dispatch(Command::SelectTile(4)).unwrap();

        assert_eq!(controller.phase(), Phase::Ended(Outcome::Won));
        assert_eq!(controller.bag().remaining(), 0);
        assert_eq!(controller.scores().session_total(), score_of("LIBRE"));

        // Busy until the frames have played, then input is refused as ended
        settle(&mut controller);
        assert!(matches!(
            controller.dispatch(Command::SelectTile(0)),
            Err(GameError::InvalidCommand { .. })
        ));

        // The session total carries into the next round
        controller.dispatch(Command::NewGame).unwrap();
        assert_eq!(controller.phase(), Phase::Idle);
        controller.dispatch(Command::Start).unwrap();
        assert_eq!(controller.scores().round_total(), 0);
        assert_eq!(controller.scores().session_total(), score_of("LIBRE"));
        assert_eq!(controller.bag().remaining(), 192);
    }

    #[test]
    fn test_timeout_refills_and_resets_clock() {
        let dictionary = Dictionary::default();
        let cfg = GameConfig {
            round_duration: 3,
            ..config()
        };
        let mut controller =
            RoundController::with_board(&dictionary, cfg, Grid::from_rows(&["A"]), LetterBag::standard());

        controller.dispatch(Command::Tick).unwrap();
        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.grid().letter_count(), 1);
        controller.dispatch(Command::Tick).unwrap();

        assert_eq!(controller.grid().letter_count(), 4);
        assert_eq!(controller.bag().remaining(), 197);
        assert_eq!(controller.state().remaining_seconds, 3);
        assert_eq!(controller.phase(), Phase::Running);

        // The clock is frozen while the refill is shown
        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.state().remaining_seconds, 3);
        settle(&mut controller);
        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.state().remaining_seconds, 2);
    }

    #[test]
    fn test_timeout_without_room_loses() {
        let dictionary = Dictionary::default();
        let cfg = GameConfig {
            round_duration: 1,
            ..config()
        };
        let grid = full_board_except(&[10, 20]);
        let mut controller = RoundController::with_board(&dictionary, cfg, grid, LetterBag::standard());

        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.phase(), Phase::Ended(Outcome::Lost));
        assert_eq!(controller.grid().letter_count(), 62);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_filling_board_loses_and_wipes_session() {
        let dictionary = Dictionary::default();
        let cfg = GameConfig {
            round_duration: 1,
            ..config()
        };
        let mut controller = RoundController::new(&dictionary, cfg);
        controller.dispatch(Command::Start).unwrap();

        for _ in 0..100 {
            settle(&mut controller);
            controller.dispatch(Command::Tick).unwrap();
            if matches!(controller.phase(), Phase::Ended(_)) {
                break;
            }
            // Every letter is on the board, in the bag, or already cleared
            assert_eq!(
                controller.grid().letter_count() + controller.bag().remaining() + controller.removed(),
                200
            );
        }

        assert_eq!(controller.phase(), Phase::Ended(Outcome::Lost));
        assert_eq!(controller.grid().letter_count(), 62);
        assert_eq!(controller.scores().session_total(), 0);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let dictionary = Dictionary::default();
        let mut controller = RoundController::new(&dictionary, config());
        controller.dispatch(Command::Start).unwrap();

        // No pausing while the seed letters are shown
        assert_eq!(
            controller.dispatch(Command::Pause),
            Err(GameError::SequenceInFlight)
        );
        settle(&mut controller);

        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.state().remaining_seconds, 59);

        controller.dispatch(Command::Pause).unwrap();
        assert_eq!(controller.phase(), Phase::Paused);
        let grid = controller.grid().clone();
        for _ in 0..5 {
            controller.dispatch(Command::Tick).unwrap();
        }
        assert_eq!(controller.state().remaining_seconds, 59);
        assert_eq!(controller.grid(), &grid);
        assert!(controller.dispatch(Command::SelectTile(0)).is_err());
        assert!(controller.dispatch(Command::Pause).is_err());

        controller.dispatch(Command::Resume).unwrap();
        controller.dispatch(Command::Tick).unwrap();
        assert_eq!(controller.state().remaining_seconds, 58);
    }

    #[test]
    fn test_toggle_pause() {
        let dictionary = Dictionary::default();
        let mut controller = RoundController::new(&dictionary, config());

        controller.dispatch(Command::TogglePause).unwrap();
        assert_eq!(controller.phase(), Phase::Running);
        settle(&mut controller);

        controller.dispatch(Command::TogglePause).unwrap();
        assert_eq!(controller.phase(), Phase::Paused);
        controller.dispatch(Command::TogglePause).unwrap();
        assert_eq!(controller.phase(), Phase::Running);
    }

    #[test]
    fn test_busy_rejects_moves() {
        let dictionary = Dictionary::default();
        let grid = Grid::from_rows(&["A"]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid, LetterBag::standard());

        controller.dispatch(Command::SelectTile(0)).unwrap();
        controller.dispatch(Command::SelectTile(1)).unwrap();
        assert!(controller.is_busy());

        let grid = controller.grid().clone();
        assert_eq!(
            controller.dispatch(Command::SelectTile(1)),
            Err(GameError::SequenceInFlight)
        );
        assert_eq!(controller.grid(), &grid);

        settle(&mut controller);
        assert!(controller.dispatch(Command::SelectTile(1)).is_ok());
    }

    #[test]
    fn test_same_tile_twice_still_refills() {
        let dictionary = Dictionary::default();
        let grid = Grid::from_rows(&["A"]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid, LetterBag::standard());
        controller.dispatch(Command::Tick).unwrap();

        controller.dispatch(Command::SelectTile(0)).unwrap();
        controller.dispatch(Command::SelectTile(0)).unwrap();

        assert_eq!(controller.grid().get(0), Some('A'));
        assert_eq!(controller.grid().letter_count(), 4);
        assert_eq!(controller.state().remaining_seconds, 60);
    }

    #[test]
    fn test_invalid_index_rejected() {
        let dictionary = Dictionary::default();
        let mut controller =
            RoundController::with_board(&dictionary, config(), Grid::new(), LetterBag::standard());
        assert_eq!(
            controller.dispatch(Command::SelectTile(64)),
            Err(GameError::InvalidIndex(64))
        );
        assert_eq!(controller.snapshot().origin, None);
    }

    #[test]
    fn test_new_game_only_after_end() {
        let dictionary = Dictionary::default();
        let mut controller = RoundController::new(&dictionary, config());
        assert!(controller.dispatch(Command::NewGame).is_err());
        assert!(controller.dispatch(Command::AcknowledgeNotice).is_err());
    }

    #[test]
    fn test_new_game_waits_for_final_frames() {
        let dictionary = Dictionary::from_words(["libre"]);
        let grid = Grid::from_rows(&["LIBR", "____E"]);
        let bag = LetterBag::from_counts(&[('Z', 1)]);
        let mut controller = RoundController::with_board(&dictionary, config(), grid, bag);

        controller.dispatch(Command::SelectTile(12)).unwrap();
        controller.dispatch(Command::SelectTile(4)).unwrap();
        assert_eq!(controller.phase(), Phase::Ended(Outcome::Won));
        assert!(controller.is_busy());

        // The winning move keeps playing out
        assert_eq!(
            controller.dispatch(Command::NewGame),
            Err(GameError::SequenceInFlight)
        );
        assert!(controller.is_busy());
        assert_eq!(controller.phase(), Phase::Ended(Outcome::Won));

        settle(&mut controller);
        controller.dispatch(Command::NewGame).unwrap();
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_pause_waits_for_notice() {
        let dictionary = Dictionary::default();
        let grid = Grid::from_rows(&["AB", "C"]);
        let mut controller =
            RoundController::with_board(&dictionary, config(), grid, LetterBag::standard());

        controller.dispatch(Command::SelectTile(0)).unwrap();
        assert!(controller.dispatch(Command::SelectTile(63)).is_err());

        assert_eq!(
            controller.dispatch(Command::Pause),
            Err(GameError::NoticePending)
        );
        assert_eq!(
            controller.dispatch(Command::TogglePause),
            Err(GameError::NoticePending)
        );
        assert_eq!(controller.phase(), Phase::Running);

        controller.dispatch(Command::AcknowledgeNotice).unwrap();
        controller.dispatch(Command::Pause).unwrap();
        assert_eq!(controller.phase(), Phase::Paused);
    }
}
