//! Application state and core logic

pub mod screen;
pub mod state;
pub mod timer;

pub use screen::AppCoordinator;
pub use state::{Phase, RoundView};
