//! Errors raised by the board engine and the round controller

use super::grid::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No chain of empty cells connects the two selected tiles
    #[error("no path from {from} to {to}")]
    IllegalMove { from: Position, to: Position },
    /// More letters were requested than the bag still holds
    #[error("cannot draw {requested} letters, only {remaining} left in the bag")]
    EmptyBag { requested: usize, remaining: usize },
    #[error("position ({row}, {col}) is outside the board")]
    InvalidPosition { row: usize, col: usize },
    #[error("cell index {0} is outside the board")]
    InvalidIndex(usize),
    /// A move or refill is still being presented
    #[error("a move is still resolving")]
    SequenceInFlight,
    #[error("a notice is waiting for acknowledgment")]
    NoticePending,
    #[error("{command} is not accepted while {phase}")]
    InvalidCommand {
        phase: &'static str,
        command: &'static str,
    },
}
