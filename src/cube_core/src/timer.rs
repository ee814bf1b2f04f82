use std::{
    fmt::{self, Display},
    time::Duration,
};

/// Time spent on the current session, carried across saves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameTimer {
    elapsed_seconds: f64,
    running: bool,
}

impl GameTimer {
    pub fn new(elapsed_seconds: f64) -> GameTimer {
        GameTimer {
            elapsed_seconds,
            running: true,
        }
    }

    /// Add `delta` if the timer is running.
    pub fn tick(&mut self, delta: Duration) {
        if self.running {
            self.elapsed_seconds += delta.as_secs_f64();
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn hms(&self) -> (u64, u64, u64) {
        let total = self.elapsed_seconds.max(0.0) as u64;
        (total / 3600, total / 60 % 60, total % 60)
    }

    /// The elapsed time in words, e.g. "3 minutes and 12 seconds".
    pub fn describe(&self) -> String {
        match self.hms() {
            (0, 0, seconds) => format!("{seconds} seconds"),
            (0, minutes, seconds) => format!("{minutes} minutes and {seconds} seconds"),
            (hours, minutes, seconds) => {
                format!("{hours} hours, {minutes} minutes and {seconds} seconds")
            }
        }
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        GameTimer::new(0.0)
    }
}

/// `MM:SS`, or `HH:MM:SS` from the first hour on.
impl Display for GameTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hms() {
            (0, minutes, seconds) => write!(f, "{minutes:02}:{seconds:02}"),
            (hours, minutes, seconds) => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
        }
    }
}
