use std::time::{Duration, Instant};

/// Paces the scheduler between ticks.
pub trait Clock {
    /// Wait `d` before the next tick.
    fn sleep(&mut self, d: Duration);
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;
}

/// Wall-clock pacing with `std::thread::sleep`.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn sleep(&mut self, d: Duration) {
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Virtual clock that advances instantly and records every wait, for offline export and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested wait, in order.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl Clock for ManualClock {
    fn sleep(&mut self, d: Duration) {
        self.now += d;
        self.sleeps.push(d);
    }

    fn elapsed(&self) -> Duration {
        self.now
    }
}
