//! Game settings and command-line flags

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Default round duration in seconds
pub const DEFAULT_ROUND_DURATION: u32 = 60;

/// Letters placed on the empty board at round start
pub const SEED_LETTERS: usize = 8;

/// Letters added after every move or timeout; also the room a refill needs
pub const REFILL_LETTERS: usize = 3;

/// Tunables for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seconds on the clock after each refill
    pub round_duration: u32,
    pub seed_letters: usize,
    pub refill_letters: usize,
    /// How long each cell of a swap path stays highlighted
    pub step_delay: Duration,
    /// How long matched cells blink before they vanish
    pub delete_delay: Duration,
    /// Fixed RNG seed for reproducible rounds
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration: DEFAULT_ROUND_DURATION,
            seed_letters: SEED_LETTERS,
            refill_letters: REFILL_LETTERS,
            step_delay: Duration::from_millis(200),
            delete_delay: Duration::from_millis(300),
            rng_seed: None,
        }
    }
}

/// Swap tiles, spell words, empty the bag.
#[derive(Debug, Parser)]
#[command(name = "wordswap", version, about)]
pub struct Cli {
    /// Seconds on the clock between refills
    #[arg(long, default_value_t = DEFAULT_ROUND_DURATION, value_parser = clap::value_parser!(u32).range(1..))]
    pub round_secs: u32,

    /// Seed the letter draws for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            round_duration: self.round_secs,
            rng_seed: self.seed,
            ..GameConfig::default()
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("wordswap.log"))
    }
}
