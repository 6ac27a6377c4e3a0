//! Frame timing for the host loop.
//!
//! Ticks take whole milliseconds.  The clock advances by exactly the amount it
//! hands out, so the sub-millisecond remainder of one frame carries into the
//! next and the summed deltas track real elapsed time.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn start(now: Instant) -> Self {
        Self { last_frame: now }
    }

    /// Forget any pending time, e.g. on restart.
    pub fn reset(&mut self, now: Instant) {
        self.last_frame = now;
    }

    /// Whole milliseconds since the previous frame.
    pub fn advance(&mut self, now: Instant) -> u64 {
        let dt_ms = now.saturating_duration_since(self.last_frame).as_millis() as u64;
        self.last_frame += Duration::from_millis(dt_ms);
        dt_ms
    }
}
