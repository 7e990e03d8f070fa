//! Source of the per-round `srand` seed
//!
//! The service seeds with `time(NULL)` when it hands out a puzzle. Sampling
//! our own clock right after receiving the puzzle usually lands in the same
//! second, a round that straddles a second boundary is lost.
use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Provides the seed for the current round
pub trait Clock {
    /// Whole seconds since the Unix epoch, truncated like a conversion to `unsigned int`.
    fn seed(&self) -> u32;
}

/// The wall clock
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn seed(&self) -> u32 {
        // a clock before 1970 is not worth an error path
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs() as u32)
    }
}

/// Returns the same seed every time
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn seed(&self) -> u32 {
        self.0
    }
}

/// Starts at a given second and advances by one on every sample
#[derive(Clone, Debug)]
pub struct TickingClock(Cell<u32>);

impl TickingClock {
    /// First sample returns `start`
    pub fn new(start: u32) -> Self {
        TickingClock(Cell::new(start))
    }
}

impl Clock for TickingClock {
    fn seed(&self) -> u32 {
        let now = self.0.get();
        self.0.set(now.wrapping_add(1));
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_recent() {
        // 2023-11-14
        assert!(SystemClock.seed() > 1_700_000_000);
    }

    #[test]
    fn ticking_clock_advances() {
        let clock = TickingClock::new(41);
        assert_eq!(clock.seed(), 41);
        assert_eq!(clock.seed(), 42);
        assert_eq!(FixedClock(7).seed(), 7);
        assert_eq!(FixedClock(7).seed(), 7);
    }
}
