//! Time measurement utilities

use std::time::{Duration, Instant};

/// Running stopwatch for timing queries and runs
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Create a stopwatch that is already running
    pub fn start_new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since the stopwatch was started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let stopwatch = Stopwatch::start_new();
        let first = stopwatch.elapsed();
        let second = stopwatch.elapsed();
        assert!(second >= first);
        assert!(stopwatch.elapsed_millis() >= 0.0);
    }
}
