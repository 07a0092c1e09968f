//! Countdown clock for the refill cycle

/// Whole-second countdown. Only ticks while the round is live, so pausing
/// and resuming never loses or double-counts a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimer {
    remaining: u32,
    duration: u32,
}

impl RoundTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }

    /// Back to the full duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_up(&self) -> bool {
        self.remaining == 0
    }

    /// Count one second down if `running`. Returns true on the tick that hits zero.
    pub fn tick_if_running(&mut self, running: bool) -> bool {
        if !running || self.is_up() {
            return false;
        }
        self.remaining -= 1;
        self.is_up()
    }
}

/// Seconds as `mm:ss`.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
