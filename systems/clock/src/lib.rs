#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-interval clock system that turns elapsed time into step commands.

use std::time::Duration;

use cellsnake_core::Command;

/// Interval between steps used when nothing else is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(150);

/// Configuration parameters required to construct the clock system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided step interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Time between two consecutive steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

/// Pure system that emits one [`Command::Step`] per elapsed interval.
#[derive(Debug)]
pub struct Clock {
    interval: Duration,
    accumulator: Duration,
    paused: bool,
}

impl Clock {
    /// Creates a running clock using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: config.interval,
            accumulator: Duration::ZERO,
            paused: false,
        }
    }

    /// Accounts for `dt` of elapsed time and emits the steps that fall due.
    pub fn handle(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if self.paused || self.interval.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            out.push(Command::Step);
        }
    }

    /// Stops emitting steps and forgets the time accumulated so far.
    pub fn pause(&mut self) {
        self.paused = true;
        self.accumulator = Duration::ZERO;
    }

    /// Starts emitting steps again.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips between paused and running, returning whether the clock is now paused.
    pub fn toggle(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Reports whether the clock is currently paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }
}
