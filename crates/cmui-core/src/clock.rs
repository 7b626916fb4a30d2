#![forbid(unsafe_code)]

//! Host-driven monotonic time.
//!
//! The page engine never reads a wall clock. The host (JS `performance.now()`
//! or a test) advances a [`DeterministicClock`] explicitly, which keeps timer
//! behavior reproducible.

use core::time::Duration;

/// Source of monotonic time since page load.
pub trait Clock {
    /// Time elapsed since the engine was created.
    fn now_mono(&self) -> Duration;
}

/// Monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_clock_advances_monotonically() {
        let mut c = DeterministicClock::new();
        assert_eq!(c.now_mono(), Duration::ZERO);

        c.advance(Duration::from_millis(300));
        assert_eq!(c.now_mono(), Duration::from_millis(300));

        c.set(Duration::from_millis(100));
        assert_eq!(c.now_mono(), Duration::from_millis(300));

        c.set(Duration::MAX);
        c.advance(Duration::from_secs(1));
        assert_eq!(c.now_mono(), Duration::MAX);
    }
}
